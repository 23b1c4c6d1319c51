//! Core value types and error handling for the class system.
//!
//! This crate provides the foundational types shared by every component:
//! the raw values class bodies are declared with, the instances constructors
//! produce, and the error taxonomy.
//!
//! # Overview
//!
//! - [`Value`] - Raw dynamic value (primitives, functions, patterns, containers)
//! - [`Instance`] - Object produced by a class constructor
//! - [`Prototype`] - Class-level slots shared by all instances of a class
//! - [`MemberKey`] - Plain or override-alias member identifier
//! - [`ClassError`] / [`ErrorKind`] - Error taxonomy
//!
//! # Examples
//!
//! ```
//! use core_types::{ClassError, ErrorKind, Value};
//!
//! let body = Value::object_from([
//!     ("count", Value::number(0.0)),
//!     ("tags", Value::array()),
//! ]);
//! assert!(body.is_object());
//! assert_eq!(body.keys(), vec!["count", "tags"]);
//!
//! let error = ClassError::InvalidMember("undefined member: count".to_string());
//! assert_eq!(error.kind(), ErrorKind::InvalidMember);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod object;
mod value;

pub use error::{ClassError, ClassResult, ErrorKind};
pub use object::{Instance, MemberKey, Prototype, ALIAS_SEPARATOR};
pub use value::{ArrayData, FunctionData, NativeFn, ObjectData, Value};
