//! Per-class reference table.

use core_types::Value;

/// Ordered, append-only storage for member values that cannot be inlined:
/// functions, patterns and arrays that need a copy per instance.
///
/// A class extending a parent starts from a verbatim copy of the parent's
/// table, so inherited descriptors keep their indices. A mixin's table is
/// appended, and descriptors taken from the mixin are shifted by the offset
/// [`ReferenceTable::append`] returns.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: Vec<Value>,
}

impl ReferenceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value and return its index
    pub fn push(&mut self, value: Value) -> usize {
        self.entries.push(value);
        self.entries.len() - 1
    }

    /// Append every entry of `other`; returns the index its first entry
    /// landed at
    pub fn append(&mut self, other: &ReferenceTable) -> usize {
        let offset = self.entries.len();
        self.entries.extend(other.entries.iter().cloned());
        offset
    }

    /// Entry at `index`
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.entries.get(index)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in index order
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter()
    }
}
