//! Unit tests for ClassError and ErrorKind

use core_types::{ClassError, ErrorKind};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_every_variant_reports_its_kind() {
        let cases = vec![
            (ClassError::DuplicateDefinition("a".into()), ErrorKind::DuplicateDefinition),
            (ClassError::MissingDependency("a".into()), ErrorKind::MissingDependency),
            (ClassError::InvalidOverride("a".into()), ErrorKind::InvalidOverride),
            (ClassError::InvalidMixin("a".into()), ErrorKind::InvalidMixin),
            (ClassError::InvalidMember("a".into()), ErrorKind::InvalidMember),
            (ClassError::InvalidDirective("a".into()), ErrorKind::InvalidDirective),
            (ClassError::VisibilityConflict("a".into()), ErrorKind::VisibilityConflict),
            (ClassError::AbstractInstantiation("a".into()), ErrorKind::AbstractInstantiation),
            (ClassError::NotCallable("a".into()), ErrorKind::NotCallable),
            (ClassError::Runtime("a".into()), ErrorKind::Runtime),
        ];
        for (error, kind) in cases {
            assert_eq!(error.kind(), kind);
            assert_eq!(error.message(), "a");
        }
    }

    #[test]
    fn test_error_kind_copy() {
        let kind1 = ErrorKind::InvalidOverride;
        let kind2 = kind1;
        assert_eq!(kind1, kind2);
    }
}

#[cfg(test)]
mod class_error_tests {
    use super::*;

    #[test]
    fn test_display_prefixes_category() {
        let error = ClassError::DuplicateDefinition("Class is already defined: Ns.A".to_string());
        assert_eq!(
            error.to_string(),
            "duplicate definition: Class is already defined: Ns.A"
        );
    }

    #[test]
    fn test_abstract_display_names_class() {
        let error = ClassError::AbstractInstantiation("Ns.Shape".to_string());
        assert_eq!(
            error.to_string(),
            "trying to create an instance of an abstract class: Ns.Shape"
        );
    }

    #[test]
    fn test_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&ClassError::runtime("boom"));
    }

    #[test]
    fn test_clone_and_eq() {
        let error = ClassError::InvalidMixin("mixin has shared members".to_string());
        assert_eq!(error.clone(), error);
    }
}
