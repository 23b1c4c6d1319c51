//! Namespace tree.
//!
//! Every class constructor is published at its dot-separated path below
//! one of the registered root namespaces. Intermediate segments are created
//! on demand.

use core_types::{ClassError, ClassResult};
use indexmap::IndexMap;

use crate::factory::Constructor;

/// One node of a namespace tree
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    constructor: Option<Constructor>,
    children: IndexMap<String, Namespace>,
}

impl Namespace {
    /// Create an empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructor published at this node
    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }

    /// Direct child by segment name
    pub fn child(&self, segment: &str) -> Option<&Namespace> {
        self.children.get(segment)
    }

    /// Names of the direct children, in creation order
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    /// Node at a dot-separated path relative to this one
    pub fn resolve(&self, relative_path: &str) -> Option<&Namespace> {
        relative_path
            .split('.')
            .try_fold(self, |node, segment| node.children.get(segment))
    }

    /// Whether a constructor may be published at `segments`
    pub(crate) fn is_vacant(&self, segments: &[&str]) -> bool {
        let mut node = self;
        for segment in segments {
            match node.children.get(*segment) {
                Some(child) => node = child,
                None => return true,
            }
        }
        node.constructor.is_none() && node.children.is_empty()
    }

    /// Publish `constructor` at `segments`, creating missing nodes
    pub(crate) fn insert(&mut self, segments: &[&str], constructor: Constructor) {
        let node = segments.iter().fold(self, |node, segment| {
            node.children.entry((*segment).to_string()).or_default()
        });
        node.constructor = Some(constructor);
    }
}

/// Split a class path into its segments.
///
/// A class path needs at least a root namespace and a class name, and no
/// segment may be empty.
pub fn split_class_path(class_path: &str) -> ClassResult<Vec<&str>> {
    let segments: Vec<&str> = class_path.split('.').collect();
    if segments.iter().any(|segment| segment.is_empty()) {
        return Err(ClassError::InvalidDirective(format!(
            "malformed class path: \"{}\"",
            class_path
        )));
    }
    if segments.len() < 2 {
        return Err(ClassError::MissingDependency(format!(
            "class path must start with a namespace, even for global classes: {}",
            class_path
        )));
    }
    Ok(segments)
}
