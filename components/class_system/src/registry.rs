//! Class registry.

use core_types::{ClassError, ClassResult, Instance};
use indexmap::IndexMap;
use log::debug;

use crate::body::ClassBody;
use crate::config::ClassConfig;
use crate::definition::ClassDefinition;
use crate::factory::{self, Constructor};
use crate::namespace::{split_class_path, Namespace};
use crate::patch;

/// Defines classes and publishes their constructors.
///
/// Classes are defined once and looked up many times. A class can only
/// extend or implement classes defined before it.
///
/// # Examples
///
/// ```
/// use class_system::{ClassBody, ClassRegistry};
/// use core_types::Value;
///
/// let mut registry = ClassRegistry::new();
/// registry.register_root_namespace("App");
///
/// registry
///     .define(
///         "App.Counter",
///         ClassBody::new()
///             .member("count", Value::number(0.0))
///             .method("init", |this, args| {
///                 this.set("count", args.first().cloned().unwrap_or(Value::number(0.0)));
///                 Ok(Value::Undefined)
///             }),
///     )
///     .unwrap();
///
/// let counter = registry
///     .get_constructor("Counter", Some("App"))
///     .unwrap()
///     .construct(&[Value::number(5.0)])
///     .unwrap();
/// assert_eq!(counter.get("count"), Some(Value::number(5.0)));
/// ```
#[derive(Debug, Default)]
pub struct ClassRegistry {
    config: ClassConfig,
    sources: IndexMap<String, ClassDefinition>,
    constructors: IndexMap<String, Constructor>,
    roots: IndexMap<String, Namespace>,
}

impl ClassRegistry {
    /// Create a registry with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with a custom configuration
    pub fn with_config(config: ClassConfig) -> Self {
        ClassRegistry {
            config,
            ..Self::default()
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ClassConfig {
        &self.config
    }

    /// Add a root namespace classes may be defined under. Registering an
    /// existing root keeps its contents.
    pub fn register_root_namespace(&mut self, name: impl Into<String>) {
        self.roots.entry(name.into()).or_default();
    }

    /// Root namespace by name
    pub fn namespace(&self, root: &str) -> Option<&Namespace> {
        self.roots.get(root)
    }

    /// Compile a class body and publish its constructor at `class_path`.
    ///
    /// Nothing is registered when any step fails.
    pub fn define(&mut self, class_path: &str, body: ClassBody) -> ClassResult<Constructor> {
        if self.sources.contains_key(class_path) || self.constructors.contains_key(class_path) {
            return Err(ClassError::DuplicateDefinition(format!(
                "class is already defined: {}",
                class_path
            )));
        }
        let segments = split_class_path(class_path)?;
        let root = self.roots.get(segments[0]).ok_or_else(|| {
            ClassError::MissingDependency(format!(
                "namespace is not registered: {} ({})",
                segments[0], class_path
            ))
        })?;
        if !root.is_vacant(&segments[1..]) {
            return Err(ClassError::DuplicateDefinition(format!(
                "class name conflict: '{}' is already defined in its namespace",
                class_path
            )));
        }

        let definition = ClassDefinition::compile(class_path, body, &self.config, &self.sources)?;
        let constructor = factory::build(&definition, &self.config)?;

        if let Some(root) = self.roots.get_mut(segments[0]) {
            root.insert(&segments[1..], constructor.clone());
        }
        debug!(
            "defined {} ({} members, {} references, {} shared{})",
            class_path,
            definition.skeleton().len(),
            definition.references().len(),
            definition.shared().len(),
            if definition.is_abstract() { ", abstract" } else { "" }
        );
        self.constructors.insert(class_path.to_string(), constructor.clone());
        self.sources.insert(class_path.to_string(), definition);
        Ok(constructor)
    }

    /// Compiled data of a defined class
    pub fn get_class_data(&self, class_path: &str) -> Option<&ClassDefinition> {
        self.sources.get(class_path)
    }

    /// Whether a class was defined at `class_path`
    pub fn has_class(&self, class_path: &str) -> bool {
        self.sources.contains_key(class_path)
    }

    /// Whether a constructor, defined or external, exists at `class_path`
    pub fn has_constructor(&self, class_path: &str) -> bool {
        self.constructors.contains_key(class_path)
    }

    /// Look up a constructor by full path, or by a path relative to
    /// `default_namespace` when the full path is unknown
    pub fn get_constructor(&self, class_path: &str, default_namespace: Option<&str>) -> Option<&Constructor> {
        match (self.constructors.get(class_path), default_namespace) {
            (Some(constructor), _) => Some(constructor),
            (None, Some(namespace)) => self
                .constructors
                .get(&format!("{}.{}", namespace, class_path)),
            (None, None) => None,
        }
    }

    /// Find the constructor at `<ancestor path><suffix>`, trying `base_path`
    /// first and then each ancestor toward the root.
    ///
    /// Fails when `base_path` is not a defined class; `Ok(None)` when no
    /// ancestor has a matching constructor.
    pub fn get_package_constructor(&self, base_path: &str, suffix: &str) -> ClassResult<Option<&Constructor>> {
        let definition = self.sources.get(base_path).ok_or_else(|| {
            ClassError::MissingDependency(format!("get_package_constructor - class not found: {}", base_path))
        })?;
        Ok(definition
            .ancestor_paths()
            .iter()
            .rev()
            .find_map(|path| self.constructors.get(&format!("{}{}", path, suffix))))
    }

    /// Paths of the defined classes, in definition order
    pub fn get_class_names(&self) -> Vec<&str> {
        self.sources.keys().map(String::as_str).collect()
    }

    /// Every defined class by path, in definition order
    pub fn get_all_classes(&self) -> &IndexMap<String, ClassDefinition> {
        &self.sources
    }

    /// Publish an externally built constructor. It is reachable through
    /// [`get_constructor`](Self::get_constructor) but carries no class data
    /// and is not placed in a namespace.
    pub fn register_existing_constructor(&mut self, class_path: &str, constructor: Constructor) -> ClassResult<()> {
        if self.sources.contains_key(class_path) {
            return Err(ClassError::DuplicateDefinition(format!(
                "class \"{}\" is already defined",
                class_path
            )));
        }
        self.constructors.insert(class_path.to_string(), constructor);
        Ok(())
    }

    /// See [`patch`](crate::patch::patch)
    pub fn patch(
        &self,
        instance: &Instance,
        declaring_class: &str,
        method: &str,
        new_method: &str,
    ) -> ClassResult<String> {
        patch::patch(instance, declaring_class, method, new_method)
    }
}
