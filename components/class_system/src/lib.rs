//! Class composition and instantiation.
//!
//! Classes are declared as data: a [`ClassBody`] of named members plus
//! directives (`Extends`, `Implements`, `Class`, `Shared`). Defining a class
//! through a [`ClassRegistry`] compiles the body once, merged with its
//! parent's and mixins' already compiled metadata, into a skeleton of typed
//! member descriptors, and turns that skeleton into a [`Constructor`].
//!
//! # Overview
//!
//! - [`Classifier`] - decides how each raw member value is stored
//! - [`ReferenceTable`] - per-class storage for functions, patterns and copied arrays
//! - [`compose`] - extension and mixin merging of skeletons
//! - [`shared`] - class-level shared members
//! - [`ClassRegistry`] - definition, lookup, namespaces
//! - [`Constructor`] - the compiled instantiation routine
//! - [`patch()`] - swaps method implementations along the override chain
//!
//! # Examples
//!
//! An overriding method can reach the implementation it replaced through
//! the `"<Parent>$<method>"` alias:
//!
//! ```
//! use class_system::{ClassBody, ClassRegistry};
//! use core_types::Value;
//!
//! let mut registry = ClassRegistry::new();
//! registry.register_root_namespace("Ns");
//!
//! registry
//!     .define("Ns.A", ClassBody::new().method("greet", |_, _| Ok(Value::string("A"))))
//!     .unwrap();
//! let b = registry
//!     .define(
//!         "Ns.B",
//!         ClassBody::new().extends("Ns.A").method("greet", |this, args| {
//!             let parent = this.call_super("A", "greet", args)?;
//!             Ok(Value::string(format!("B+{}", parent)))
//!         }),
//!     )
//!     .unwrap();
//!
//! let instance = b.construct(&[]).unwrap();
//! assert_eq!(instance.call("greet", &[]).unwrap(), Value::string("B+A"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod body;
pub mod classifier;
pub mod compose;
mod config;
mod definition;
pub mod descriptor;
pub mod directives;
mod factory;
pub mod namespace;
mod patch;
mod references;
mod registry;
pub mod shared;
mod skeleton;

pub use body::ClassBody;
pub use classifier::Classifier;
pub use config::ClassConfig;
pub use definition::{class_name, ClassDefinition};
pub use descriptor::{MemberDescriptor, Skeleton};
pub use directives::Directives;
pub use factory::{build as build_constructor, Constructor, FactoryFn};
pub use namespace::Namespace;
pub use patch::patch;
pub use references::ReferenceTable;
pub use registry::ClassRegistry;
pub use shared::SharedMembers;
pub use skeleton::build_skeleton;
