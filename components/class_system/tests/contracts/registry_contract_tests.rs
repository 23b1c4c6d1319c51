//! Registry surface: define, lookups, namespaces, external constructors

use std::rc::Rc;

use class_system::{ClassBody, ClassRegistry, Constructor};
use core_types::{Instance, Prototype, Value};

fn registry() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry.register_root_namespace("App");
    registry
}

/// Contract: consumers only need `construct` and an `init` member
#[test]
fn test_construct_forwards_arbitrary_arguments() {
    let mut registry = registry();
    let echo = registry
        .define(
            "App.Echo",
            ClassBody::new().member("received", Value::Null).method("init", |this, args| {
                this.set("received", Value::array_from(args.to_vec()));
                Ok(Value::Undefined)
            }),
        )
        .unwrap();

    let args = [Value::string("a"), Value::object(), Value::number(1.0)];
    let instance = echo.construct(&args).unwrap();
    let received = instance.get("received").unwrap();
    assert_eq!(received.array_length(), 3);
    assert_eq!(received.array_get(1), Some(args[1].clone()));
}

/// Contract: define returns the constructor it publishes
#[test]
fn test_define_returns_published_constructor() {
    let mut registry = registry();
    let defined = registry.define("App.models.User", ClassBody::new()).unwrap();
    assert_eq!(defined.path(), "App.models.User");
    assert!(registry
        .get_constructor("User", Some("App.models"))
        .unwrap()
        .same_constructor(&defined));
}

/// Contract: class data is retained with the body it came from
#[test]
fn test_class_data_retains_body() {
    let mut registry = registry();
    registry
        .define("App.Config", ClassBody::new().member("debug", Value::boolean(false)))
        .unwrap();
    let data = registry.get_class_data("App.Config").unwrap();
    assert_eq!(data.path(), "App.Config");
    assert_eq!(data.name(), "Config");
    assert_eq!(data.class_body().get("debug"), Some(&Value::boolean(false)));
    assert_eq!(data.ancestor_paths(), ["App.Config".to_string()]);
}

/// Contract: external constructors are reachable by path only
#[test]
fn test_register_existing_constructor() {
    let mut registry = registry();
    let proto = Rc::new(Prototype::new("App.Native", "Native", vec!["Native".to_string()]));
    let native = Constructor::from_fn("App.Native", move |_| Ok(Instance::new(Rc::clone(&proto), 0)));

    registry.register_existing_constructor("App.Native", native).unwrap();
    assert!(registry.has_constructor("App.Native"));
    assert!(!registry.has_class("App.Native"));
    assert!(registry.get_class_names().is_empty());

    let instance = registry
        .get_constructor("App.Native", None)
        .unwrap()
        .construct(&[])
        .unwrap();
    assert_eq!(instance.class_path(), "App.Native");
}

/// Contract: constructors are published in the namespace tree
#[test]
fn test_namespace_tree() {
    let mut registry = registry();
    registry.define("App.view.Button", ClassBody::new()).unwrap();
    registry.define("App.view.Input", ClassBody::new()).unwrap();

    let view = registry.namespace("App").and_then(|root| root.child("view")).unwrap();
    assert_eq!(view.child_names().collect::<Vec<_>>(), vec!["Button", "Input"]);
    assert!(view.constructor().is_none());
    assert!(view.child("Input").and_then(|node| node.constructor()).is_some());
}
