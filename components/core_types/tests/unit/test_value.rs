//! Unit tests for Value

use core_types::Value;
use num_bigint::BigInt;

#[cfg(test)]
mod value_creation_tests {
    use super::*;

    #[test]
    fn test_primitives() {
        assert!(Value::null().is_null());
        assert!(Value::undefined().is_undefined());
        assert_eq!(Value::boolean(true).as_boolean(), Some(true));
        assert_eq!(Value::number(2.5).as_number(), Some(2.5));
        assert_eq!(Value::string("hi").as_str(), Some("hi"));
    }

    #[test]
    fn test_from_conversions() {
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from(3), Value::Number(3.0));
        assert_eq!(Value::from("x"), Value::String("x".to_string()));
    }

    #[test]
    fn test_named_function_keeps_name() {
        let f = Value::named_function("greet", |_, _| Ok(Value::Null));
        assert_eq!(f.as_function().unwrap().name.as_deref(), Some("greet"));
    }

    #[test]
    fn test_pattern_matches() {
        let re = Value::pattern(r"^\d+$").unwrap();
        assert!(re.as_pattern().unwrap().is_match("123"));
        assert_eq!(re.to_string(), r"/^\d+$/");
    }

    #[test]
    fn test_is_simple() {
        assert!(Value::Undefined.is_simple());
        assert!(Value::Null.is_simple());
        assert!(Value::string("a").is_simple());
        assert!(!Value::array().is_simple());
        assert!(!Value::object().is_simple());
        assert!(!Value::bigint(BigInt::from(1)).is_simple());
    }
}

#[cfg(test)]
mod value_container_tests {
    use super::*;

    #[test]
    fn test_clone_shares_object() {
        let obj = Value::object();
        let alias = obj.clone();
        alias.set("k", Value::number(1.0));
        assert_eq!(obj.get("k"), Some(Value::number(1.0)));
    }

    #[test]
    fn test_shallow_copy_object() {
        let nested = Value::object();
        let obj = Value::object_from([("nested", nested.clone())]);
        let copy = obj.shallow_copy();
        copy.set("extra", Value::Null);
        assert!(!obj.has_own("extra"));
        assert_eq!(copy.get("nested"), Some(nested));
    }

    #[test]
    fn test_array_access() {
        let arr = Value::array_from(vec![Value::number(1.0)]);
        arr.push(Value::number(2.0));
        assert_eq!(arr.array_length(), 2);
        assert_eq!(arr.array_get(1), Some(Value::number(2.0)));
        assert_eq!(arr.array_get(2), None);
        assert_eq!(arr.array_elements().len(), 2);
    }

    #[test]
    fn test_non_container_accessors_are_inert() {
        let n = Value::number(1.0);
        n.set("k", Value::Null);
        n.push(Value::Null);
        assert_eq!(n.get("k"), None);
        assert_eq!(n.array_length(), 0);
        assert!(n.keys().is_empty());
    }

    #[test]
    fn test_structural_eq_nested() {
        let a = Value::object_from([
            ("list", Value::array_from(vec![Value::string("x")])),
            ("flag", Value::boolean(false)),
        ]);
        let b = Value::object_from([
            ("list", Value::array_from(vec![Value::string("x")])),
            ("flag", Value::boolean(false)),
        ]);
        assert!(a.structural_eq(&b));
        b.get("list").unwrap().push(Value::Null);
        assert!(!a.structural_eq(&b));
    }
}
