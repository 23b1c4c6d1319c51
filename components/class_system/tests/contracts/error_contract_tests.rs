//! Error taxonomy surfaced by definition and construction

use class_system::{ClassBody, ClassRegistry};
use core_types::{ClassError, ErrorKind, Value};

fn define(registry: &mut ClassRegistry, path: &str, body: ClassBody) -> Result<(), ClassError> {
    registry.define(path, body).map(|_| ())
}

fn registry_with_base() -> ClassRegistry {
    let mut registry = ClassRegistry::new();
    registry.register_root_namespace("Ns");
    registry
        .define(
            "Ns.Base",
            ClassBody::new()
                .member("run", Value::function(|_, _| Ok(Value::Null)))
                .member("options", Value::object()),
        )
        .unwrap_or_else(|e| panic!("base class must compile: {}", e));
    registry
}

/// Contract: every configuration error kind is reachable from define
#[test]
fn test_definition_error_kinds() {
    let mut registry = registry_with_base();
    registry
        .define(
            "Ns.Mixin",
            ClassBody::new().member("_afterInit", Value::function(|_, _| Ok(Value::Null))),
        )
        .unwrap();

    let cases: Vec<(&str, ClassBody, ErrorKind)> = vec![
        ("Ns.Base", ClassBody::new(), ErrorKind::DuplicateDefinition),
        ("Ns.A", ClassBody::new().extends("Ns.Missing"), ErrorKind::MissingDependency),
        ("Missing.A", ClassBody::new(), ErrorKind::MissingDependency),
        (
            "Ns.A",
            ClassBody::new().extends("Ns.Base").member("run", Value::number(1.0)),
            ErrorKind::InvalidOverride,
        ),
        ("Ns.A", ClassBody::new().implements("Ns.Mixin"), ErrorKind::InvalidMixin),
        ("Ns.A", ClassBody::new().member("x", Value::Undefined), ErrorKind::InvalidMember),
        ("Ns.A", ClassBody::new().member("Extends", Value::Null), ErrorKind::InvalidDirective),
        ("Ns..A", ClassBody::new(), ErrorKind::InvalidDirective),
        (
            "Ns.A",
            ClassBody::new()
                .extends("Ns.Base")
                .shared("options")
                .member("options", Value::object()),
            ErrorKind::VisibilityConflict,
        ),
    ];

    for (path, body, expected) in cases {
        let err = define(&mut registry, path, body).unwrap_err();
        assert_eq!(err.kind(), expected, "{}: {}", path, err);
    }
}

/// Contract: an alias already declared by the child is a duplicate
#[test]
fn test_alias_collision_is_duplicate() {
    let mut registry = registry_with_base();
    let err = define(
        &mut registry,
        "Ns.Child",
        ClassBody::new()
            .extends("Ns.Base")
            .member("run", Value::function(|_, _| Ok(Value::Null)))
            .member("Base$run", Value::function(|_, _| Ok(Value::Null))),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DuplicateDefinition);
}

/// Contract: construction errors carry the class path
#[test]
fn test_construction_errors() {
    let mut registry = registry_with_base();
    let shape = registry
        .define("Ns.Shape", ClassBody::new().is_abstract(true))
        .unwrap();
    let err = shape.construct(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AbstractInstantiation);
    assert!(err.to_string().contains("Ns.Shape"));

    let failing = registry
        .define(
            "Ns.Failing",
            ClassBody::new().method("init", |this, _| this.call("missing", &[])),
        )
        .unwrap();
    let err = failing.construct(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotCallable);
    assert_eq!(err.message(), "Ns.Failing::missing is not defined");
}
