//! Benchmarks for class definition and instantiation
//!
//! Every benchmark defines its classes in a fresh [`class_system::ClassRegistry`]
//! and then constructs one of them repeatedly. It includes:
//!
//! - Micro-benchmarks, one per member kind or composition feature
//! - A runner with timing and table or JSON result formatting
//!
//! # Examples
//!
//! ```rust,no_run
//! use benchmarks::micro;
//!
//! let results = micro::run_all();
//! for result in results {
//!     println!("{}: {:.2}ms", result.name, result.duration_ms);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod micro;
pub mod runner;

pub use runner::{Benchmark, BenchmarkResult, BenchmarkSuite, Setup, BENCH_NAMESPACE};
