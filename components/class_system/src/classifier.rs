//! Member classification.
//!
//! Decides, once and from its runtime shape, how a raw member value is
//! stored: as a literal, as a reference-table entry, or as a nested
//! skeleton.

use core_types::{ClassError, ClassResult, MemberKey, Value};

use crate::config::ClassConfig;
use crate::descriptor::{MemberDescriptor, Skeleton};
use crate::references::ReferenceTable;

/// Classifies member values of one class, appending non-inlineable values
/// to that class's reference table.
pub struct Classifier<'a> {
    class_path: &'a str,
    inline_simple_arrays: bool,
    references: &'a mut ReferenceTable,
}

impl<'a> Classifier<'a> {
    /// Create a classifier writing into `references`
    pub fn new(class_path: &'a str, config: &ClassConfig, references: &'a mut ReferenceTable) -> Self {
        Classifier {
            class_path,
            inline_simple_arrays: config.inline_simple_arrays,
            references,
        }
    }

    /// Classify one member value.
    ///
    /// Functions, patterns and non-inlineable arrays are appended to the
    /// reference table; the returned descriptor holds the index they landed
    /// at. Plain objects are disassembled recursively.
    pub fn classify(&mut self, name: &str, value: &Value) -> ClassResult<MemberDescriptor> {
        let descriptor = match value {
            Value::Null | Value::Boolean(_) | Value::Number(_) => {
                MemberDescriptor::Primitive(value.clone())
            }
            Value::String(s) => MemberDescriptor::Text(s.clone()),
            Value::Function(_) => MemberDescriptor::ReferenceFunction(self.references.push(value.clone())),
            Value::Pattern(_) => MemberDescriptor::ReferencePattern(self.references.push(value.clone())),
            Value::Object(obj) => {
                let data = obj.borrow();
                let skeleton = self.disassemble(data.properties.iter())?;
                MemberDescriptor::Nested(skeleton)
            }
            Value::Array(arr) => {
                let data = arr.borrow();
                if data.elements.is_empty() {
                    MemberDescriptor::EmptyArray
                } else if self.inline_simple_arrays && data.elements.iter().all(Value::is_simple) {
                    MemberDescriptor::InlineArray(data.elements.clone())
                } else {
                    MemberDescriptor::ReferenceArray(self.references.push(value.clone()))
                }
            }
            Value::Undefined => {
                return Err(ClassError::InvalidMember(format!(
                    "please, replace undefined member values with null: {}::{}",
                    self.class_path, name
                )))
            }
            Value::Instance(_) | Value::BigInt(_) => {
                return Err(ClassError::InvalidMember(format!(
                    "unsupported property type in source object: {} ({}::{})",
                    value.type_name(),
                    self.class_path,
                    name
                )))
            }
        };
        Ok(descriptor)
    }

    /// Disassemble the members of a nested object. Directive names carry no
    /// meaning below the root and are classified like any other member.
    pub fn disassemble<'b, I>(&mut self, members: I) -> ClassResult<Skeleton>
    where
        I: IntoIterator<Item = (&'b String, &'b Value)>,
    {
        let mut skeleton = Skeleton::new();
        for (name, value) in members {
            let descriptor = self.classify(name, value)?;
            skeleton.insert(MemberKey::parse(name), descriptor);
        }
        Ok(skeleton)
    }
}
