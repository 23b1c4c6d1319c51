//! Member descriptors and skeletons.
//!
//! A skeleton is the structural description of a class: for every member,
//! how its value is produced on a new instance. Values that cannot be
//! written as literals are kept in the class's
//! [`ReferenceTable`](crate::ReferenceTable) and addressed by index.

use core_types::{MemberKey, Value};
use indexmap::IndexMap;

/// Skeleton of a class body or of a nested object, in declaration order.
pub type Skeleton = IndexMap<MemberKey, MemberDescriptor>;

/// How one member is stored and materialized.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberDescriptor {
    /// null, boolean or number, written as a literal
    Primitive(Value),
    /// String, written as a literal
    Text(String),
    /// Function in the reference table; lives on the prototype
    ReferenceFunction(usize),
    /// Pattern in the reference table; lives on the prototype
    ReferencePattern(usize),
    /// `[]`, allocated per instance
    EmptyArray,
    /// Array of simple values, written as a literal
    InlineArray(Vec<Value>),
    /// Array in the reference table, shallow-copied per instance
    ReferenceArray(usize),
    /// Plain object, allocated per instance
    Nested(Skeleton),
}

impl MemberDescriptor {
    /// Whether the member is a method
    pub fn is_callable(&self) -> bool {
        matches!(self, MemberDescriptor::ReferenceFunction(_))
    }

    /// Whether the member is a `null` placeholder, the only slot a child
    /// class may turn into a method
    pub fn is_null_placeholder(&self) -> bool {
        matches!(self, MemberDescriptor::Primitive(Value::Null))
    }

    /// Nested skeleton, if the member is a plain object
    pub fn as_nested(&self) -> Option<&Skeleton> {
        match self {
            MemberDescriptor::Nested(skeleton) => Some(skeleton),
            _ => None,
        }
    }

    /// Reference-table index, for the kinds stored there
    pub fn reference_index(&self) -> Option<usize> {
        match self {
            MemberDescriptor::ReferenceFunction(index)
            | MemberDescriptor::ReferencePattern(index)
            | MemberDescriptor::ReferenceArray(index) => Some(*index),
            _ => None,
        }
    }

    /// The same descriptor with its reference index moved by `offset`.
    /// Kinds without an index are returned unchanged.
    pub fn shifted(&self, offset: usize) -> Self {
        match self {
            MemberDescriptor::ReferenceFunction(index) => {
                MemberDescriptor::ReferenceFunction(index + offset)
            }
            MemberDescriptor::ReferencePattern(index) => {
                MemberDescriptor::ReferencePattern(index + offset)
            }
            MemberDescriptor::ReferenceArray(index) => MemberDescriptor::ReferenceArray(index + offset),
            other => other.clone(),
        }
    }

    /// Short kind name used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            MemberDescriptor::Primitive(_) => "primitive",
            MemberDescriptor::Text(_) => "text",
            MemberDescriptor::ReferenceFunction(_) => "function",
            MemberDescriptor::ReferencePattern(_) => "pattern",
            MemberDescriptor::EmptyArray => "empty array",
            MemberDescriptor::InlineArray(_) => "inline array",
            MemberDescriptor::ReferenceArray(_) => "reference array",
            MemberDescriptor::Nested(_) => "object",
        }
    }
}
