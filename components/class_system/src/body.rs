//! Class bodies.

use core_types::{ClassError, ClassResult, Instance, Value};
use indexmap::IndexMap;

use crate::directives::{CLASS, EXTENDS, IMPLEMENTS, IS_ABSTRACT, SHARED};

/// A class declared as data: named members plus directives.
///
/// Directives are ordinary entries under reserved names (`Extends`,
/// `Implements`, `Class`, `Shared`); the builder methods write them in the
/// shape the registry expects.
///
/// # Examples
///
/// ```
/// use class_system::ClassBody;
/// use core_types::Value;
///
/// let body = ClassBody::new()
///     .extends("App.Widget")
///     .implements("App.mixin.Observable")
///     .shared("defaults")
///     .member("defaults", Value::object())
///     .member("title", Value::string("untitled"))
///     .method("render", |this, _| Ok(this.get("title").unwrap_or(Value::Null)));
///
/// assert_eq!(body.len(), 6);
/// assert!(body.contains("Extends"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClassBody {
    members: IndexMap<String, Value>,
}

impl ClassBody {
    /// Create an empty body
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `Extends` directive
    pub fn extends(mut self, parent_path: impl Into<String>) -> Self {
        self.members
            .insert(EXTENDS.to_string(), Value::string(parent_path));
        self
    }

    /// Add a path to the `Implements` directive
    pub fn implements(mut self, mixin_path: impl Into<String>) -> Self {
        self.append_to_list(IMPLEMENTS, mixin_path.into());
        self
    }

    /// Add a name to the `Shared` directive
    pub fn shared(mut self, name: impl Into<String>) -> Self {
        self.append_to_list(SHARED, name.into());
        self
    }

    /// Set `is_abstract` in the `Class` options directive
    pub fn is_abstract(mut self, is_abstract: bool) -> Self {
        match self.members.get(CLASS) {
            Some(options @ Value::Object(_)) => options.set(IS_ABSTRACT, Value::boolean(is_abstract)),
            _ => {
                self.members.insert(
                    CLASS.to_string(),
                    Value::object_from([(IS_ABSTRACT, Value::boolean(is_abstract))]),
                );
            }
        }
        self
    }

    /// Add a member
    pub fn member(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.insert(name.into(), value);
        self
    }

    /// Add a method member
    pub fn method<F>(self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> ClassResult<Value> + 'static,
    {
        let name = name.into();
        let value = Value::named_function(name.clone(), func);
        self.member(name, value)
    }

    /// Insert or replace an entry in place
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.members.insert(name.into(), value);
    }

    /// Entry by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.members.get(name)
    }

    /// Whether an entry exists
    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Number of entries, directives included
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the body has no entries
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.members.iter()
    }

    /// The body as a plain object value
    pub fn to_value(&self) -> Value {
        Value::object_from(self.members.iter().map(|(k, v)| (k.clone(), v.clone())))
    }

    fn append_to_list(&mut self, directive: &str, item: String) {
        let item = Value::string(item);
        match self.members.get(directive) {
            Some(list @ Value::Array(_)) => list.push(item),
            Some(Value::String(existing)) => {
                let list = Value::array_from(vec![Value::string(existing.clone()), item]);
                self.members.insert(directive.to_string(), list);
            }
            _ => {
                self.members.insert(directive.to_string(), item);
            }
        }
    }
}

impl From<IndexMap<String, Value>> for ClassBody {
    fn from(members: IndexMap<String, Value>) -> Self {
        ClassBody { members }
    }
}

impl TryFrom<Value> for ClassBody {
    type Error = ClassError;

    /// Accepts a plain object value; its entries become the body.
    fn try_from(value: Value) -> ClassResult<Self> {
        match value {
            Value::Object(obj) => Ok(ClassBody {
                members: obj.borrow().properties.clone(),
            }),
            other => Err(ClassError::InvalidDirective(format!(
                "class body must be an object, got {}",
                other.type_name()
            ))),
        }
    }
}
