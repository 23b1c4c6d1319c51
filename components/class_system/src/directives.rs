//! Class-body directives.
//!
//! `Extends`, `Implements`, `Class` and `Shared` are entries of the class
//! body that configure the class instead of becoming members.

use core_types::{ClassError, ClassResult, Value};

use crate::body::ClassBody;

/// Parent class directive
pub const EXTENDS: &str = "Extends";
/// Mixin list directive
pub const IMPLEMENTS: &str = "Implements";
/// Class options directive
pub const CLASS: &str = "Class";
/// Shared member list directive
pub const SHARED: &str = "Shared";
/// Option inside `Class` marking the class abstract
pub const IS_ABSTRACT: &str = "is_abstract";

/// Body entries that never become members
pub const RESERVED_MEMBERS: [&str; 4] = [EXTENDS, IMPLEMENTS, CLASS, SHARED];

/// Whether `name` is a directive name
pub fn is_reserved(name: &str) -> bool {
    RESERVED_MEMBERS.contains(&name)
}

/// Directives of one class body, validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Directives {
    /// Parent class path
    pub extends: Option<String>,
    /// Mixin paths in declaration order
    pub implements: Vec<String>,
    /// Names declared shared by this class
    pub shared: Vec<String>,
    /// Whether the class is abstract
    pub is_abstract: bool,
}

impl Directives {
    /// Read and validate the directives of `body`
    pub fn parse(class_path: &str, body: &ClassBody) -> ClassResult<Self> {
        let mut directives = Directives::default();

        if let Some(options) = body.get(CLASS) {
            if !options.is_object() {
                return Err(ClassError::InvalidDirective(format!(
                    "malformed '{}' property in {}",
                    CLASS, class_path
                )));
            }
            directives.is_abstract = options.get(IS_ABSTRACT).map_or(false, |v| v.is_truthy());
        }

        if let Some(parent) = body.get(EXTENDS) {
            match parent.as_str() {
                Some(path) => directives.extends = Some(path.to_string()),
                None => {
                    return Err(ClassError::InvalidDirective(format!(
                        "value of {} directive must be a string: {}",
                        EXTENDS, class_path
                    )))
                }
            }
        }

        if let Some(value) = body.get(IMPLEMENTS) {
            directives.implements = string_list(class_path, IMPLEMENTS, value)?;
        }

        if let Some(value) = body.get(SHARED) {
            directives.shared = string_list(class_path, SHARED, value)?;
        }

        Ok(directives)
    }
}

/// A string, or an array of strings
fn string_list(class_path: &str, directive: &str, value: &Value) -> ClassResult<Vec<String>> {
    let malformed = || {
        ClassError::InvalidDirective(format!(
            "value of {} directive must be a string or a list of strings: {}",
            directive, class_path
        ))
    };
    match value {
        Value::String(s) => Ok(vec![s.clone()]),
        Value::Array(_) => value
            .array_elements()
            .into_iter()
            .map(|item| item.as_str().map(str::to_string).ok_or_else(malformed))
            .collect(),
        _ => Err(malformed()),
    }
}
