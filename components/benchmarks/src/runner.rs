//! Benchmark runner and result types
//!
//! Each benchmark defines its classes in a fresh registry, then times
//! repeated construction of one of them.

use class_system::{ClassRegistry, Constructor};
use core_types::{ClassResult, Value};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

/// Root namespace benchmark classes are defined under
pub const BENCH_NAMESPACE: &str = "Bench";

/// Defines the benchmark's classes and returns the constructor to time
pub type Setup = fn(&mut ClassRegistry) -> ClassResult<Constructor>;

/// A single benchmark
#[derive(Clone)]
pub struct Benchmark {
    /// Name of the benchmark
    pub name: String,
    /// Description of what the benchmark tests
    pub description: String,
    /// Class definitions
    pub setup: Setup,
    /// Arguments passed to every construction
    pub args: Vec<Value>,
    /// Number of instances constructed per run
    pub iterations: usize,
}

impl fmt::Debug for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Benchmark")
            .field("name", &self.name)
            .field("iterations", &self.iterations)
            .finish()
    }
}

/// Result of running a benchmark
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Name of the benchmark
    pub name: String,
    /// Description of the benchmark
    pub description: String,
    /// Instances constructed
    pub iterations: usize,
    /// Time spent defining the classes, in milliseconds
    pub setup_ms: f64,
    /// Time spent constructing, in milliseconds
    pub duration_ms: f64,
    /// Instances per second
    pub ops_per_sec: Option<f64>,
    /// Whether the benchmark completed successfully
    pub success: bool,
    /// Error message if failed
    pub error: Option<String>,
}

impl BenchmarkResult {
    fn failed(benchmark: &Benchmark, setup_ms: f64, duration_ms: f64, error: String) -> Self {
        BenchmarkResult {
            name: benchmark.name.clone(),
            description: benchmark.description.clone(),
            iterations: benchmark.iterations,
            setup_ms,
            duration_ms,
            ops_per_sec: None,
            success: false,
            error: Some(error),
        }
    }
}

impl Benchmark {
    /// The same benchmark with a different iteration count
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Run this benchmark once in a fresh registry
    pub fn run(&self) -> BenchmarkResult {
        let mut registry = ClassRegistry::new();
        registry.register_root_namespace(BENCH_NAMESPACE);

        let start = Instant::now();
        let constructor = match (self.setup)(&mut registry) {
            Ok(constructor) => constructor,
            Err(e) => {
                let setup_ms = start.elapsed().as_secs_f64() * 1000.0;
                return BenchmarkResult::failed(self, setup_ms, 0.0, e.to_string());
            }
        };
        let setup_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "{}: {} classes defined in {:.3} ms",
            self.name,
            registry.get_class_names().len(),
            setup_ms
        );

        let start = Instant::now();
        for _ in 0..self.iterations {
            if let Err(e) = constructor.construct(&self.args) {
                let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
                return BenchmarkResult::failed(self, setup_ms, duration_ms, e.to_string());
            }
        }
        let elapsed = start.elapsed().as_secs_f64();

        BenchmarkResult {
            name: self.name.clone(),
            description: self.description.clone(),
            iterations: self.iterations,
            setup_ms,
            duration_ms: elapsed * 1000.0,
            ops_per_sec: (elapsed > 0.0).then(|| self.iterations as f64 / elapsed),
            success: true,
            error: None,
        }
    }

    /// Run this benchmark `runs` times and average the timings
    pub fn run_multiple(&self, runs: usize) -> BenchmarkResult {
        let runs = runs.max(1);
        let mut results = Vec::with_capacity(runs);
        for _ in 0..runs {
            let result = self.run();
            if !result.success {
                return result;
            }
            results.push(result);
        }

        let count = results.len() as f64;
        let setup_ms = results.iter().map(|r| r.setup_ms).sum::<f64>() / count;
        let duration_ms = results.iter().map(|r| r.duration_ms).sum::<f64>() / count;
        BenchmarkResult {
            name: self.name.clone(),
            description: self.description.clone(),
            iterations: self.iterations,
            setup_ms,
            duration_ms,
            ops_per_sec: (duration_ms > 0.0).then(|| self.iterations as f64 / (duration_ms / 1000.0)),
            success: true,
            error: None,
        }
    }
}

/// Suite of benchmarks
pub struct BenchmarkSuite {
    /// Name of the suite
    pub name: String,
    /// Benchmarks in this suite
    pub benchmarks: Vec<Benchmark>,
}

impl BenchmarkSuite {
    /// Create a new benchmark suite
    pub fn new(name: String) -> Self {
        Self {
            name,
            benchmarks: Vec::new(),
        }
    }

    /// Add a benchmark to this suite
    pub fn add(&mut self, benchmark: Benchmark) {
        self.benchmarks.push(benchmark);
    }

    /// Keep only the benchmarks whose name contains `pattern`
    pub fn filter(mut self, pattern: &str) -> Self {
        self.benchmarks.retain(|b| b.name.contains(pattern));
        self
    }

    /// Run all benchmarks in this suite
    pub fn run(&self) -> Vec<BenchmarkResult> {
        self.benchmarks.iter().map(Benchmark::run).collect()
    }

    /// Run all benchmarks multiple times and average
    pub fn run_multiple(&self, runs: usize) -> Vec<BenchmarkResult> {
        self.benchmarks.iter().map(|b| b.run_multiple(runs)).collect()
    }
}

/// Format benchmark results as a human-readable table
pub fn format_results(results: &[BenchmarkResult]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "\n{:<30} {:>10} {:>12} {:>15} {:<8}\n",
        "Benchmark", "Instances", "Setup (ms)", "Instances/s", "Status"
    ));
    output.push_str(&format!("{}\n", "=".repeat(79)));

    for result in results {
        let status = if result.success { "PASS" } else { "FAIL" };
        let rate = result
            .ops_per_sec
            .map_or_else(|| "-".to_string(), |ops| format!("{:.0}", ops));
        output.push_str(&format!(
            "{:<30} {:>10} {:>12.3} {:>15} {:<8}\n",
            result.name, result.iterations, result.setup_ms, rate, status
        ));

        if let Some(error) = &result.error {
            output.push_str(&format!("  Error: {}\n", error));
        }
    }

    output
}

/// Format benchmark results as JSON
pub fn format_results_json(results: &[BenchmarkResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}
