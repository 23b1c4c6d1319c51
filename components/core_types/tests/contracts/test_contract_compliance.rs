//! Contract compliance tests for core_types
//!
//! These tests pin the public surface other components rely on.

use std::rc::Rc;

use core_types::{ClassResult, ErrorKind, Instance, MemberKey, Prototype, Value, ALIAS_SEPARATOR};

#[cfg(test)]
mod value_contract_tests {
    use super::*;

    /// Contract: member functions receive the instance and the arguments
    #[test]
    fn test_function_signature() {
        let f = Value::function(|this: &Instance, args: &[Value]| -> ClassResult<Value> {
            Ok(Value::string(format!("{}:{}", this.class_path(), args.len())))
        });
        let proto = Rc::new(Prototype::new("A.B", "B", vec!["B".to_string()]));
        let instance = Instance::new(proto, 0);
        let out = f.as_function().unwrap().call(&instance, &[Value::Null]).unwrap();
        assert_eq!(out, Value::string("A.B:1"));
    }

    /// Contract: type names used by diagnostics
    #[test]
    fn test_type_name_contract() {
        assert_eq!(Value::object().type_name(), "object");
        assert_eq!(Value::array().type_name(), "array");
        assert_eq!(Value::function(|_, _| Ok(Value::Null)).type_name(), "function");
    }
}

#[cfg(test)]
mod member_key_contract_tests {
    use super::*;

    /// Contract: aliases are written "<ClassName>$<member>"
    #[test]
    fn test_alias_format() {
        assert_eq!(ALIAS_SEPARATOR, '$');
        assert_eq!(MemberKey::alias("A", "greet").to_string(), "A$greet");
    }

    /// Contract: errors expose their category
    #[test]
    fn test_error_kind_available() {
        let err = Value::pattern("[").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidMember);
    }
}
