//! Raw member values.
//!
//! Class bodies are declared as [`Value`] trees: the class system inspects
//! each value's runtime shape to decide how the member is stored and how it
//! is materialized on every new instance. Containers (objects and arrays) are
//! reference types shared through `Rc<RefCell<_>>`, so cloning a container
//! value clones the reference, not the contents.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::Zero;
use regex::Regex;

use crate::error::{ClassError, ClassResult};
use crate::object::Instance;

/// Signature of a member function.
///
/// The function receives the instance it was invoked on and the call
/// arguments.
pub type NativeFn = dyn Fn(&Instance, &[Value]) -> ClassResult<Value>;

/// Internal function data
pub struct FunctionData {
    /// Optional name, used for diagnostics only
    pub name: Option<String>,
    func: Box<NativeFn>,
}

impl FunctionData {
    /// Invoke the function with `this` bound to `instance`
    pub fn call(&self, instance: &Instance, args: &[Value]) -> ClassResult<Value> {
        (self.func)(instance, args)
    }
}

impl fmt::Debug for FunctionData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionData")
            .field("name", &self.name)
            .finish()
    }
}

/// Internal object data, insertion ordered
#[derive(Debug, Clone, Default)]
pub struct ObjectData {
    /// Object properties
    pub properties: IndexMap<String, Value>,
}

/// Internal array data
#[derive(Debug, Clone, Default)]
pub struct ArrayData {
    /// Array elements
    pub elements: Vec<Value>,
}

/// A raw value, as found in a class body or stored on an instance.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let tags = Value::array_from(vec![Value::string("a"), Value::Null]);
/// let alias = tags.clone();
/// alias.push(Value::number(1.0));
///
/// // Cloning a container shares it
/// assert_eq!(tags.array_length(), 3);
/// assert_eq!(tags, alias);
///
/// // A shallow copy does not
/// let copy = tags.shallow_copy();
/// copy.push(Value::boolean(true));
/// assert_eq!(tags.array_length(), 3);
/// assert_ne!(tags, copy);
/// ```
#[derive(Debug, Clone)]
pub enum Value {
    /// undefined; rejected as a member value
    Undefined,
    /// null
    Null,
    /// Boolean value
    Boolean(bool),
    /// Number (IEEE 754 double)
    Number(f64),
    /// String value
    String(String),
    /// Callable member
    Function(Rc<FunctionData>),
    /// Compiled regular expression
    Pattern(Rc<Regex>),
    /// Plain associative object
    Object(Rc<RefCell<ObjectData>>),
    /// Array
    Array(Rc<RefCell<ArrayData>>),
    /// Instance produced by a class constructor
    Instance(Instance),
    /// Arbitrary precision integer
    BigInt(BigInt),
}

impl Value {
    /// Create undefined value
    pub fn undefined() -> Self {
        Value::Undefined
    }

    /// Create null value
    pub fn null() -> Self {
        Value::Null
    }

    /// Create boolean value
    pub fn boolean(v: bool) -> Self {
        Value::Boolean(v)
    }

    /// Create number value
    pub fn number(v: f64) -> Self {
        Value::Number(v)
    }

    /// Create string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Create a function value
    pub fn function<F>(func: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> ClassResult<Value> + 'static,
    {
        Value::Function(Rc::new(FunctionData {
            name: None,
            func: Box::new(func),
        }))
    }

    /// Create a function value carrying a diagnostic name
    pub fn named_function<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> ClassResult<Value> + 'static,
    {
        Value::Function(Rc::new(FunctionData {
            name: Some(name.into()),
            func: Box::new(func),
        }))
    }

    /// Compile a pattern value from regex source
    pub fn pattern(source: &str) -> ClassResult<Self> {
        Regex::new(source)
            .map(|re| Value::Pattern(Rc::new(re)))
            .map_err(|e| ClassError::InvalidMember(format!("malformed pattern {:?}: {}", source, e)))
    }

    /// Create empty object
    pub fn object() -> Self {
        Value::Object(Rc::new(RefCell::new(ObjectData::default())))
    }

    /// Create object from key/value pairs, keeping their order
    pub fn object_from<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let properties = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Object(Rc::new(RefCell::new(ObjectData { properties })))
    }

    /// Create empty array
    pub fn array() -> Self {
        Value::Array(Rc::new(RefCell::new(ArrayData::default())))
    }

    /// Create array from values
    pub fn array_from(values: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(ArrayData { elements: values })))
    }

    /// Create a BigInt value
    pub fn bigint(value: BigInt) -> Self {
        Value::BigInt(value)
    }

    /// Check if value is undefined
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if value is boolean
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Check if value is number
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Check if value is string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if value is a function
    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Check if value is a pattern
    pub fn is_pattern(&self) -> bool {
        matches!(self, Value::Pattern(_))
    }

    /// Check if value is a plain object
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Check if value is an array
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if value is a class instance
    pub fn is_instance(&self) -> bool {
        matches!(self, Value::Instance(_))
    }

    /// Whether the value may appear inside an inlined array literal:
    /// strings, booleans, numbers, null and undefined.
    pub fn is_simple(&self) -> bool {
        matches!(
            self,
            Value::Undefined | Value::Null | Value::Boolean(_) | Value::Number(_) | Value::String(_)
        )
    }

    /// Get as boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as function
    pub fn as_function(&self) -> Option<&Rc<FunctionData>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Get as pattern
    pub fn as_pattern(&self) -> Option<&Regex> {
        match self {
            Value::Pattern(re) => Some(re),
            _ => None,
        }
    }

    /// Get as instance
    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    /// Set object property. No-op on non-objects.
    pub fn set(&self, key: &str, value: Value) {
        if let Value::Object(obj) = self {
            obj.borrow_mut().properties.insert(key.to_string(), value);
        }
    }

    /// Get object property
    pub fn get(&self, key: &str) -> Option<Value> {
        match self {
            Value::Object(obj) => obj.borrow().properties.get(key).cloned(),
            _ => None,
        }
    }

    /// Check if object has own property
    pub fn has_own(&self, key: &str) -> bool {
        match self {
            Value::Object(obj) => obj.borrow().properties.contains_key(key),
            _ => false,
        }
    }

    /// Object keys in insertion order; empty for non-objects
    pub fn keys(&self) -> Vec<String> {
        match self {
            Value::Object(obj) => obj.borrow().properties.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Object entries in insertion order; empty for non-objects
    pub fn entries(&self) -> Vec<(String, Value)> {
        match self {
            Value::Object(obj) => obj
                .borrow()
                .properties
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Append to an array. No-op on non-arrays.
    pub fn push(&self, value: Value) {
        if let Value::Array(arr) = self {
            arr.borrow_mut().elements.push(value);
        }
    }

    /// Get array element
    pub fn array_get(&self, index: usize) -> Option<Value> {
        match self {
            Value::Array(arr) => arr.borrow().elements.get(index).cloned(),
            _ => None,
        }
    }

    /// Get array length
    pub fn array_length(&self) -> usize {
        match self {
            Value::Array(arr) => arr.borrow().elements.len(),
            _ => 0,
        }
    }

    /// Snapshot of the array elements; empty for non-arrays
    pub fn array_elements(&self) -> Vec<Value> {
        match self {
            Value::Array(arr) => arr.borrow().elements.clone(),
            _ => Vec::new(),
        }
    }

    /// Type tag of the value, used in diagnostics and classification.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Pattern(_) => "regexp",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
            Value::Instance(_) => "instance",
            Value::BigInt(_) => "bigint",
        }
    }

    /// Returns whether this value is truthy: everything except undefined,
    /// null, false, 0, NaN and the empty string.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => !n.is_nan() && *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::BigInt(n) => !n.is_zero(),
            Value::Function(_)
            | Value::Pattern(_)
            | Value::Object(_)
            | Value::Array(_)
            | Value::Instance(_) => true,
        }
    }

    /// Copy a container one level deep.
    ///
    /// Arrays and objects get a new container holding the same element
    /// values; any other value is returned as is.
    pub fn shallow_copy(&self) -> Value {
        match self {
            Value::Array(arr) => Value::array_from(arr.borrow().elements.clone()),
            Value::Object(obj) => Value::Object(Rc::new(RefCell::new(obj.borrow().clone()))),
            other => other.clone(),
        }
    }

    /// Copy nested plain objects recursively.
    ///
    /// Every other value, arrays included, is kept by reference.
    pub fn deep_copy(&self) -> Value {
        match self {
            Value::Object(obj) => Value::object_from(
                obj.borrow()
                    .properties
                    .iter()
                    .map(|(k, v)| (k.clone(), v.deep_copy())),
            ),
            other => other.clone(),
        }
    }

    /// Identity comparison: primitives by value, reference types by pointer.
    pub fn same_value(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Pattern(a), Value::Pattern(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Instance(a), Value::Instance(b)) => a.same_instance(b),
            _ => false,
        }
    }

    /// Structural comparison: containers compare element-wise, functions,
    /// patterns and instances by identity.
    pub fn structural_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Object(a), Value::Object(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let a = a.borrow();
                let b = b.borrow();
                a.properties.len() == b.properties.len()
                    && a.properties.iter().all(|(k, v)| {
                        b.properties
                            .get(k)
                            .map_or(false, |other| v.structural_eq(other))
                    })
            }
            (Value::Array(a), Value::Array(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let a = a.borrow();
                let b = b.borrow();
                a.elements.len() == b.elements.len()
                    && a
                        .elements
                        .iter()
                        .zip(b.elements.iter())
                        .all(|(x, y)| x.structural_eq(y))
            }
            _ => self.same_value(other),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.same_value(other)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<Instance> for Value {
    fn from(v: Instance) -> Self {
        Value::Instance(v)
    }
}

/// Display form used in messages and string concatenation, for the
/// supported value kinds.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if n.is_sign_positive() {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "{}", s),
            Value::Function(_) => write!(f, "function() {{ [native code] }}"),
            Value::Pattern(re) => write!(f, "/{}/", re.as_str()),
            Value::Object(_) => write!(f, "[object Object]"),
            Value::Array(arr) => {
                let elements: Vec<String> = arr
                    .borrow()
                    .elements
                    .iter()
                    .map(|e| match e {
                        Value::Undefined | Value::Null => String::new(),
                        other => other.to_string(),
                    })
                    .collect();
                write!(f, "{}", elements.join(","))
            }
            Value::Instance(instance) => write!(f, "[object {}]", instance.class_path()),
            Value::BigInt(n) => write!(f, "{}n", n),
        }
    }
}
