//! Instances and their class-level prototypes.
//!
//! An [`Instance`] owns the members that are materialized per construction
//! (literals, copied arrays, nested objects). Everything computed once per
//! class (functions, patterns, override aliases and shared members) lives on
//! the [`Prototype`], which every instance of the class references.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::{ClassError, ClassResult};
use crate::value::Value;

/// Separator between the class name and member name of an alias
pub const ALIAS_SEPARATOR: char = '$';

/// Identifier of a member slot.
///
/// Plain members are addressed by their name. A parent's overridden method
/// is retained under an alias naming the class it came from, written
/// `"<ClassName>$<member>"`.
///
/// # Examples
///
/// ```
/// use core_types::MemberKey;
///
/// let key = MemberKey::parse("Base$greet");
/// assert_eq!(key, MemberKey::alias("Base", "greet"));
/// assert_eq!(key.member_name(), "greet");
/// assert_eq!(key.to_string(), "Base$greet");
///
/// assert_eq!(MemberKey::parse("$el"), MemberKey::plain("$el"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKey {
    /// A member addressed by its own name
    Plain(String),
    /// A method retained from an ancestor class
    Alias {
        /// Short name of the class the implementation came from
        class_name: String,
        /// Name of the overridden member
        member: String,
    },
}

impl MemberKey {
    /// Create a plain key
    pub fn plain(name: impl Into<String>) -> Self {
        MemberKey::Plain(name.into())
    }

    /// Create an alias key
    pub fn alias(class_name: impl Into<String>, member: impl Into<String>) -> Self {
        MemberKey::Alias {
            class_name: class_name.into(),
            member: member.into(),
        }
    }

    /// Parse a member name. Names of the form `"<Class>$<member>"` with both
    /// sides non-empty are aliases; anything else is plain.
    pub fn parse(name: &str) -> Self {
        match name.split_once(ALIAS_SEPARATOR) {
            Some((class_name, member)) if !class_name.is_empty() && !member.is_empty() => {
                MemberKey::alias(class_name, member)
            }
            _ => MemberKey::plain(name),
        }
    }

    /// Name of the member this key addresses, without the class prefix
    pub fn member_name(&self) -> &str {
        match self {
            MemberKey::Plain(name) => name,
            MemberKey::Alias { member, .. } => member,
        }
    }

    /// Whether this key is an override alias
    pub fn is_alias(&self) -> bool {
        matches!(self, MemberKey::Alias { .. })
    }
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberKey::Plain(name) => write!(f, "{}", name),
            MemberKey::Alias { class_name, member } => {
                write!(f, "{}{}{}", class_name, ALIAS_SEPARATOR, member)
            }
        }
    }
}

impl From<&str> for MemberKey {
    fn from(name: &str) -> Self {
        MemberKey::parse(name)
    }
}

/// Class-level storage shared by every instance of one class.
#[derive(Debug)]
pub struct Prototype {
    class_path: String,
    class_name: String,
    ancestor_names: Vec<String>,
    override_chains: IndexMap<String, Vec<String>>,
    slots: RefCell<IndexMap<MemberKey, Value>>,
}

impl Prototype {
    /// Create an empty prototype.
    ///
    /// `ancestor_names` lists the short names of the inheritance chain from
    /// the root class down to this class.
    pub fn new(
        class_path: impl Into<String>,
        class_name: impl Into<String>,
        ancestor_names: Vec<String>,
    ) -> Self {
        Prototype {
            class_path: class_path.into(),
            class_name: class_name.into(),
            ancestor_names,
            override_chains: IndexMap::new(),
            slots: RefCell::new(IndexMap::new()),
        }
    }

    /// Attach the override-chain table: for each overridden method, the
    /// short names of the ancestors whose implementation is retained under
    /// an alias, root first.
    pub fn with_override_chains(mut self, override_chains: IndexMap<String, Vec<String>>) -> Self {
        self.override_chains = override_chains;
        self
    }

    /// Full path of the class
    pub fn class_path(&self) -> &str {
        &self.class_path
    }

    /// Short name of the class
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Short names of the inheritance chain, root first
    pub fn ancestor_names(&self) -> &[String] {
        &self.ancestor_names
    }

    /// Ancestors holding an alias for `member`, root first
    pub fn override_chain(&self, member: &str) -> &[String] {
        self.override_chains
            .get(member)
            .map_or(&[][..], |chain| chain.as_slice())
    }

    /// Read a slot
    pub fn get(&self, key: &MemberKey) -> Option<Value> {
        self.slots.borrow().get(key).cloned()
    }

    /// Write a slot
    pub fn set(&self, key: MemberKey, value: Value) {
        self.slots.borrow_mut().insert(key, value);
    }

    /// Whether the slot exists, whatever its value
    pub fn contains(&self, key: &MemberKey) -> bool {
        self.slots.borrow().contains_key(key)
    }

    /// Whether the slot holds a truthy value. Slots nulled out by a patch
    /// are no longer live.
    pub fn is_live(&self, key: &MemberKey) -> bool {
        self.slots
            .borrow()
            .get(key)
            .map_or(false, Value::is_truthy)
    }

    /// Slot keys in insertion order
    pub fn keys(&self) -> Vec<MemberKey> {
        self.slots.borrow().keys().cloned().collect()
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Whether the prototype has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

struct InstanceData {
    prototype: Rc<Prototype>,
    fields: RefCell<IndexMap<String, Value>>,
}

/// An object produced by a class constructor.
///
/// Cloning an `Instance` clones the handle; both handles address the same
/// object.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
/// use core_types::{Instance, MemberKey, Prototype, Value};
///
/// let proto = Rc::new(Prototype::new("Ns.Point", "Point", vec!["Point".to_string()]));
/// proto.set(
///     MemberKey::plain("sum"),
///     Value::function(|this, _| {
///         let x = this.get("x").and_then(|v| v.as_number()).unwrap_or(0.0);
///         let y = this.get("y").and_then(|v| v.as_number()).unwrap_or(0.0);
///         Ok(Value::number(x + y))
///     }),
/// );
///
/// let point = Instance::new(proto, 2);
/// point.set("x", Value::number(1.0));
/// point.set("y", Value::number(2.0));
/// assert_eq!(point.call("sum", &[]).unwrap(), Value::number(3.0));
/// ```
#[derive(Clone)]
pub struct Instance(Rc<InstanceData>);

impl Instance {
    /// Allocate an instance with room for `capacity` own fields
    pub fn new(prototype: Rc<Prototype>, capacity: usize) -> Self {
        Instance(Rc::new(InstanceData {
            prototype,
            fields: RefCell::new(IndexMap::with_capacity(capacity)),
        }))
    }

    /// The class-level prototype
    pub fn prototype(&self) -> &Rc<Prototype> {
        &self.0.prototype
    }

    /// Full path of the instance's class
    pub fn class_path(&self) -> &str {
        self.0.prototype.class_path()
    }

    /// Read a member: own fields first, then the prototype
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.0.fields.borrow().get(name) {
            return Some(value.clone());
        }
        self.0.prototype.get(&MemberKey::parse(name))
    }

    /// Write an own field
    pub fn set(&self, name: &str, value: Value) {
        self.0.fields.borrow_mut().insert(name.to_string(), value);
    }

    /// Whether the instance owns the field
    pub fn has_own(&self, name: &str) -> bool {
        self.0.fields.borrow().contains_key(name)
    }

    /// Names of the own fields in materialization order
    pub fn field_names(&self) -> Vec<String> {
        self.0.fields.borrow().keys().cloned().collect()
    }

    /// Invoke a member function with `this` bound to the instance.
    pub fn call(&self, name: &str, args: &[Value]) -> ClassResult<Value> {
        match self.get(name) {
            Some(Value::Function(func)) => func.call(self, args),
            Some(other) => Err(ClassError::NotCallable(format!(
                "{}::{} is {}",
                self.class_path(),
                name,
                other.type_name()
            ))),
            None => Err(ClassError::NotCallable(format!(
                "{}::{} is not defined",
                self.class_path(),
                name
            ))),
        }
    }

    /// Invoke the implementation `class_name` provided for `method` before
    /// it was overridden.
    pub fn call_super(&self, class_name: &str, method: &str, args: &[Value]) -> ClassResult<Value> {
        self.call(&MemberKey::alias(class_name, method).to_string(), args)
    }

    /// Whether both handles address the same object
    pub fn same_instance(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class_path())
            .field("fields", &self.field_names())
            .finish()
    }
}
