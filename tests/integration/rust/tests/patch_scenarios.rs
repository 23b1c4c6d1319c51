//! Patch Integration Tests
//!
//! Method replacement along override chains of registry-defined classes.

use class_system::{ClassBody, ClassRegistry, Constructor};
use core_types::{ErrorKind, Value};
use integration_tests::registry_with;

fn views(registry: &mut ClassRegistry) -> (Constructor, Constructor) {
    let view = registry
        .define(
            "Ns.View",
            ClassBody::new()
                .method("render", |_, _| Ok(Value::string("view")))
                .method("renderCompact", |_, _| Ok(Value::string("compact"))),
        )
        .unwrap();
    let panel = registry
        .define(
            "Ns.Panel",
            ClassBody::new()
                .extends("Ns.View")
                .method("render", |this, args| {
                    let inner = this.call_super("View", "render", args)?;
                    Ok(Value::string(format!("{}+panel", inner)))
                })
                .method("renderPlain", |_, _| Ok(Value::string("plain"))),
        )
        .unwrap();
    (view, panel)
}

/// Test: an ancestor's patch replaces its own implementation under the alias
#[test]
fn test_ancestor_patch_keeps_override() {
    let mut registry = registry_with(&["Ns"]);
    let (_, panel) = views(&mut registry);
    let instance = panel.construct(&[]).unwrap();

    let replaced = registry
        .patch(&instance, "View", "render", "renderCompact")
        .unwrap();
    assert_eq!(replaced, "View$render");
    assert_eq!(instance.call("render", &[]).unwrap(), Value::string("compact+panel"));
    assert_eq!(instance.get("renderCompact"), Some(Value::Null));
}

/// Test: the most derived class patches the plain slot
#[test]
fn test_derived_patch_replaces_plain_slot() {
    let mut registry = registry_with(&["Ns"]);
    let (_, panel) = views(&mut registry);
    let instance = panel.construct(&[]).unwrap();

    let replaced = registry.patch(&instance, "Panel", "render", "renderPlain").unwrap();
    assert_eq!(replaced, "render");
    assert_eq!(instance.call("render", &[]).unwrap(), Value::string("plain"));
}

/// Test: the prototype is per class, so patches reach later instances of
/// the patched class only
#[test]
fn test_patch_scope() {
    let mut registry = registry_with(&["Ns"]);
    let (view, panel) = views(&mut registry);
    let first = panel.construct(&[]).unwrap();
    registry.patch(&first, "View", "render", "renderCompact").unwrap();

    let later = panel.construct(&[]).unwrap();
    assert_eq!(later.call("render", &[]).unwrap(), Value::string("compact+panel"));

    let plain_view = view.construct(&[]).unwrap();
    assert_eq!(plain_view.call("render", &[]).unwrap(), Value::string("view"));
}

/// Test: only classes in the instance's chain may patch it
#[test]
fn test_patch_from_unrelated_class() {
    let mut registry = registry_with(&["Ns"]);
    let (view, _) = views(&mut registry);
    let instance = view.construct(&[]).unwrap();

    let err = registry
        .patch(&instance, "Panel", "render", "renderCompact")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingDependency);
}
