//! Unit tests for Instance, Prototype and MemberKey

use std::rc::Rc;

use core_types::{ClassError, Instance, MemberKey, Prototype, Value};

fn counter_prototype() -> Rc<Prototype> {
    let proto = Rc::new(Prototype::new(
        "App.Counter",
        "Counter",
        vec!["Counter".to_string()],
    ));
    proto.set(
        MemberKey::plain("increment"),
        Value::function(|this, args| {
            let step = args.first().and_then(|v| v.as_number()).unwrap_or(1.0);
            let current = this.get("count").and_then(|v| v.as_number()).unwrap_or(0.0);
            this.set("count", Value::number(current + step));
            Ok(Value::number(current + step))
        }),
    );
    proto.set(
        MemberKey::plain("fail"),
        Value::function(|_, _| Err(ClassError::runtime("failed on purpose"))),
    );
    proto
}

#[test]
fn test_method_mutates_own_fields() {
    let counter = Instance::new(counter_prototype(), 1);
    counter.set("count", Value::number(0.0));
    counter.call("increment", &[]).unwrap();
    counter.call("increment", &[Value::number(5.0)]).unwrap();
    assert_eq!(counter.get("count"), Some(Value::number(6.0)));
}

#[test]
fn test_instances_share_prototype() {
    let proto = counter_prototype();
    let a = Instance::new(proto.clone(), 0);
    let b = Instance::new(proto.clone(), 0);
    assert!(Rc::ptr_eq(a.prototype(), b.prototype()));
    assert!(!a.same_instance(&b));
    assert!(a.same_instance(&a.clone()));
}

#[test]
fn test_user_error_propagates() {
    let counter = Instance::new(counter_prototype(), 0);
    let err = counter.call("fail", &[]).unwrap_err();
    assert_eq!(err, ClassError::runtime("failed on purpose"));
}

#[test]
fn test_field_names_keep_order() {
    let instance = Instance::new(counter_prototype(), 3);
    instance.set("b", Value::Null);
    instance.set("a", Value::Null);
    assert_eq!(instance.field_names(), vec!["b", "a"]);
    assert!(instance.has_own("a"));
    assert!(!instance.has_own("increment"));
}

#[test]
fn test_instance_as_value() {
    let instance = Instance::new(counter_prototype(), 0);
    let value = Value::from(instance.clone());
    assert!(value.is_instance());
    assert_eq!(value.to_string(), "[object App.Counter]");
    assert!(value.as_instance().unwrap().same_instance(&instance));
}

#[test]
fn test_alias_key_lookup_through_instance() {
    let proto = counter_prototype();
    proto.set(MemberKey::alias("Base", "increment"), Value::Null);
    let instance = Instance::new(proto, 0);
    assert_eq!(instance.get("Base$increment"), Some(Value::Null));
}
