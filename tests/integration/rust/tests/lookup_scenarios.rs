//! Lookup Integration Tests
//!
//! Constructor lookup by path, by default namespace and by package suffix,
//! alongside constructors built outside the registry.

use std::rc::Rc;

use class_system::{ClassBody, ClassRegistry, Constructor};
use core_types::{ErrorKind, Instance, Prototype, Value};
use integration_tests::registry_with;

fn ui_registry() -> ClassRegistry {
    let mut registry = registry_with(&["Ui"]);
    registry
        .define("Ui.Control", ClassBody::new().member("kind", Value::string("control")))
        .unwrap();
    registry
        .define(
            "Ui.Control.Renderer",
            ClassBody::new().member("target", Value::string("control")),
        )
        .unwrap();
    registry
        .define("Ui.Button", ClassBody::new().extends("Ui.Control"))
        .unwrap();
    registry
        .define("Ui.IconButton", ClassBody::new().extends("Ui.Button"))
        .unwrap();
    registry
        .define(
            "Ui.Button.Renderer",
            ClassBody::new().member("target", Value::string("button")),
        )
        .unwrap();
    registry
}

/// Test: the nearest ancestor with a matching package constructor wins
#[test]
fn test_package_constructor_walks_toward_root() {
    let registry = ui_registry();

    let renderer = registry
        .get_package_constructor("Ui.IconButton", ".Renderer")
        .unwrap()
        .unwrap();
    assert_eq!(renderer.path(), "Ui.Button.Renderer");

    let renderer = registry
        .get_package_constructor("Ui.Control", ".Renderer")
        .unwrap()
        .unwrap();
    let instance = renderer.construct(&[]).unwrap();
    assert_eq!(instance.get("target"), Some(Value::string("control")));
}

/// Test: no match is not an error, an unknown base class is
#[test]
fn test_package_constructor_misses() {
    let registry = ui_registry();
    assert!(registry
        .get_package_constructor("Ui.IconButton", ".Editor")
        .unwrap()
        .is_none());

    let err = registry
        .get_package_constructor("Ui.Missing", ".Renderer")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingDependency);
}

/// Test: class constructors and package members share the namespace tree
#[test]
fn test_namespace_nodes_hold_constructor_and_children() {
    let registry = ui_registry();
    let button = registry.namespace("Ui").and_then(|ui| ui.resolve("Button")).unwrap();

    assert_eq!(button.constructor().map(Constructor::path), Some("Ui.Button"));
    assert_eq!(button.child_names().collect::<Vec<_>>(), vec!["Renderer"]);
}

/// Test: relative lookup falls back to the default namespace
#[test]
fn test_default_namespace_lookup() {
    let registry = ui_registry();

    let full = registry.get_constructor("Ui.Button", Some("Other")).unwrap();
    let relative = registry.get_constructor("Button", Some("Ui")).unwrap();
    assert!(full.same_constructor(relative));

    assert!(registry.get_constructor("Button", None).is_none());
    assert!(registry.get_constructor("Button.Renderer", Some("Ui")).is_some());
}

/// Test: an external constructor can not take the path of a defined class
#[test]
fn test_external_constructor_registration() {
    let mut registry = ui_registry();
    let proto = Rc::new(Prototype::new("Ui.Canvas", "Canvas", vec!["Canvas".to_string()]));
    let canvas = Constructor::from_fn("Ui.Canvas", move |args| {
        let instance = Instance::new(Rc::clone(&proto), 1);
        instance.set("size", args.first().cloned().unwrap_or(Value::Null));
        Ok(instance)
    });

    registry
        .register_existing_constructor("Ui.Canvas", canvas.clone())
        .unwrap();
    let instance = registry
        .get_constructor("Canvas", Some("Ui"))
        .unwrap()
        .construct(&[Value::number(3.0)])
        .unwrap();
    assert_eq!(instance.get("size"), Some(Value::number(3.0)));

    let err = registry
        .register_existing_constructor("Ui.Button", canvas)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateDefinition);

    let err = registry.define("Ui.Canvas", ClassBody::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateDefinition);
}

/// Test: definition order is preserved in the class listing
#[test]
fn test_class_listing() {
    let registry = ui_registry();
    assert_eq!(
        registry.get_class_names(),
        vec![
            "Ui.Control",
            "Ui.Control.Renderer",
            "Ui.Button",
            "Ui.IconButton",
            "Ui.Button.Renderer",
        ]
    );
    assert_eq!(registry.get_all_classes().len(), 5);
    assert_eq!(
        registry.get_class_data("Ui.IconButton").unwrap().ancestor_paths(),
        ["Ui.Control".to_string(), "Ui.Button".to_string(), "Ui.IconButton".to_string()]
    );
}
