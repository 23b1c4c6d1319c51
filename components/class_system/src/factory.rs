//! Factory builder.
//!
//! Compiles a class definition into a [`Constructor`]. Everything that is
//! the same for every instance (methods, patterns, override aliases, shared
//! members) is written once to the class [`Prototype`]; the remaining
//! members become a flat list of field initializers replayed per instance.

use std::fmt;
use std::rc::Rc;

use core_types::{ClassError, ClassResult, Instance, MemberKey, Prototype, Value};

use crate::config::ClassConfig;
use crate::definition::ClassDefinition;
use crate::descriptor::{MemberDescriptor, Skeleton};
use crate::references::ReferenceTable;

/// Signature of an instantiation routine
pub type FactoryFn = dyn Fn(&[Value]) -> ClassResult<Instance>;

/// Handle to an instantiation routine.
///
/// Cloning is cheap; clones share the routine and the prototype.
#[derive(Clone)]
pub struct Constructor {
    path: Rc<str>,
    factory: Rc<FactoryFn>,
    prototype: Option<Rc<Prototype>>,
}

impl Constructor {
    /// Wrap an externally built routine. Such constructors have no class
    /// data and no prototype of their own.
    pub fn from_fn<F>(path: impl Into<String>, factory: F) -> Self
    where
        F: Fn(&[Value]) -> ClassResult<Instance> + 'static,
    {
        let path: String = path.into();
        Constructor {
            path: Rc::from(path),
            factory: Rc::new(factory),
            prototype: None,
        }
    }

    /// Create an instance, passing `args` to the class's initializer
    pub fn construct(&self, args: &[Value]) -> ClassResult<Instance> {
        (self.factory)(args)
    }

    /// Path the constructor was built for
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Prototype shared by the constructed instances; `None` for abstract
    /// classes and external routines
    pub fn prototype(&self) -> Option<&Rc<Prototype>> {
        self.prototype.as_ref()
    }

    /// Whether both handles address the same routine
    pub fn same_constructor(&self, other: &Constructor) -> bool {
        Rc::ptr_eq(&self.factory, &other.factory)
    }
}

impl fmt::Debug for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("path", &self.path)
            .field("has_prototype", &self.prototype.is_some())
            .finish()
    }
}

/// How one instance field is produced
#[derive(Debug, Clone)]
enum FieldInit {
    /// Primitive or string, copied
    Literal(Value),
    EmptyArray,
    InlineArray(Vec<Value>),
    /// Fresh shallow copy of the stored array
    CopyArray(Value),
    /// Function or pattern inside a nested object, shared by reference
    Reference(Value),
    Nested(Vec<(String, FieldInit)>),
}

impl FieldInit {
    fn compile(path: &str, descriptor: &MemberDescriptor, references: &ReferenceTable) -> ClassResult<Self> {
        Ok(match descriptor {
            MemberDescriptor::Primitive(value) => FieldInit::Literal(value.clone()),
            MemberDescriptor::Text(text) => FieldInit::Literal(Value::string(text.clone())),
            MemberDescriptor::EmptyArray => FieldInit::EmptyArray,
            MemberDescriptor::InlineArray(values) => FieldInit::InlineArray(values.clone()),
            MemberDescriptor::ReferenceArray(index) => FieldInit::CopyArray(reference(path, references, *index)?),
            MemberDescriptor::ReferenceFunction(index) | MemberDescriptor::ReferencePattern(index) => {
                FieldInit::Reference(reference(path, references, *index)?)
            }
            MemberDescriptor::Nested(skeleton) => FieldInit::Nested(compile_fields(path, skeleton, references)?),
        })
    }

    fn materialize(&self) -> Value {
        match self {
            FieldInit::Literal(value) | FieldInit::Reference(value) => value.clone(),
            FieldInit::EmptyArray => Value::array(),
            FieldInit::InlineArray(values) => Value::array_from(values.clone()),
            FieldInit::CopyArray(source) => source.shallow_copy(),
            FieldInit::Nested(fields) => Value::object_from(
                fields
                    .iter()
                    .map(|(name, init)| (name.clone(), init.materialize())),
            ),
        }
    }
}

fn compile_fields(
    path: &str,
    skeleton: &Skeleton,
    references: &ReferenceTable,
) -> ClassResult<Vec<(String, FieldInit)>> {
    skeleton
        .iter()
        .map(|(key, descriptor)| Ok((key.to_string(), FieldInit::compile(path, descriptor, references)?)))
        .collect()
}

fn reference(path: &str, references: &ReferenceTable, index: usize) -> ClassResult<Value> {
    references.get(index).cloned().ok_or_else(|| {
        ClassError::runtime(format!(
            "reference index {} out of range in {} ({} entries)",
            index,
            path,
            references.len()
        ))
    })
}

struct Factory {
    prototype: Rc<Prototype>,
    fields: Vec<(String, FieldInit)>,
    init: Option<String>,
    after_init: Option<String>,
}

impl Factory {
    fn construct(&self, args: &[Value]) -> ClassResult<Instance> {
        let instance = Instance::new(Rc::clone(&self.prototype), self.fields.len());
        for (name, init) in &self.fields {
            instance.set(name, init.materialize());
        }
        if let Some(init) = &self.init {
            instance.call(init, args)?;
        }
        if let Some(hook) = &self.after_init {
            instance.call(hook, &[])?;
        }
        Ok(instance)
    }
}

/// Build the constructor of a compiled class.
///
/// An abstract class gets a constructor that always fails with
/// [`ClassError::AbstractInstantiation`].
pub fn build(definition: &ClassDefinition, config: &ClassConfig) -> ClassResult<Constructor> {
    let path = definition.path();
    if definition.is_abstract() {
        let message = path.to_string();
        return Ok(Constructor {
            path: Rc::from(path),
            factory: Rc::new(move |_: &[Value]| -> ClassResult<Instance> {
                Err(ClassError::AbstractInstantiation(message.clone()))
            }),
            prototype: None,
        });
    }

    let skeleton = definition.skeleton();
    let references = definition.references();
    let prototype = Prototype::new(path, definition.name(), definition.ancestor_names().to_vec())
        .with_override_chains(definition.override_chains().clone());

    let mut fields = Vec::with_capacity(skeleton.len());
    for (key, descriptor) in skeleton {
        match descriptor {
            MemberDescriptor::ReferenceFunction(index) | MemberDescriptor::ReferencePattern(index) => {
                prototype.set(key.clone(), reference(path, references, *index)?);
            }
            other => fields.push((key.to_string(), FieldInit::compile(path, other, references)?)),
        }
    }
    for (name, value) in definition.shared() {
        prototype.set(MemberKey::parse(name), value.clone());
    }

    let init = match skeleton.get(&MemberKey::parse(&config.init_member)) {
        Some(descriptor) if descriptor.is_callable() => Some(config.init_member.clone()),
        Some(descriptor) if descriptor.is_null_placeholder() => None,
        Some(descriptor) => {
            return Err(ClassError::InvalidMember(format!(
                "{} must be a function, got {}: {}",
                config.init_member,
                descriptor.kind_name(),
                path
            )))
        }
        None => None,
    };
    let after_init = match skeleton.get(&MemberKey::parse(&config.after_init_member)) {
        Some(descriptor) if descriptor.is_callable() => Some(config.after_init_member.clone()),
        Some(_) => {
            return Err(ClassError::InvalidMember(format!(
                "{} is not a function. If {} is defined then it must be a function: {}",
                config.after_init_member, config.after_init_member, path
            )))
        }
        None => None,
    };

    let factory = Factory {
        prototype: Rc::new(prototype),
        fields,
        init,
        after_init,
    };
    let prototype = Rc::clone(&factory.prototype);
    Ok(Constructor {
        path: Rc::from(path),
        factory: Rc::new(move |args: &[Value]| factory.construct(args)),
        prototype: Some(prototype),
    })
}
