//! Class system error types.
//!
//! Every failure of the class system is a [`ClassError`]. Configuration
//! errors are raised synchronously while a class is being defined; the only
//! errors raised at instantiation time are [`ClassError::AbstractInstantiation`]
//! and the runtime errors produced when invoking members.

use thiserror::Error;

/// The category of a [`ClassError`].
///
/// Mirrors the variants of [`ClassError`] without their messages so callers
/// can match on the failure category alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Path already registered, mixin implemented twice, alias already
    /// present, or a name repeated in the inheritance chain
    DuplicateDefinition,
    /// Parent, mixin or namespace root is not registered
    MissingDependency,
    /// A member changes shape across an extend boundary
    InvalidOverride,
    /// A mixin declares shared members or a post-init hook
    InvalidMixin,
    /// Unsupported raw value, or an explicit undefined member
    InvalidMember,
    /// Malformed directive or class path
    InvalidDirective,
    /// A shared member collides with an instance member
    VisibilityConflict,
    /// An abstract class was instantiated
    AbstractInstantiation,
    /// A missing or non-function member was invoked
    NotCallable,
    /// Error raised by a member function
    Runtime,
}

/// An error produced by the class system.
///
/// # Examples
///
/// ```
/// use core_types::{ClassError, ErrorKind};
///
/// let error = ClassError::MissingDependency("parent class not found: \"Ns.Base\"".to_string());
/// assert_eq!(error.kind(), ErrorKind::MissingDependency);
/// assert_eq!(
///     error.to_string(),
///     "missing dependency: parent class not found: \"Ns.Base\""
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassError {
    /// See [`ErrorKind::DuplicateDefinition`]
    #[error("duplicate definition: {0}")]
    DuplicateDefinition(String),
    /// See [`ErrorKind::MissingDependency`]
    #[error("missing dependency: {0}")]
    MissingDependency(String),
    /// See [`ErrorKind::InvalidOverride`]
    #[error("invalid override: {0}")]
    InvalidOverride(String),
    /// See [`ErrorKind::InvalidMixin`]
    #[error("invalid mixin: {0}")]
    InvalidMixin(String),
    /// See [`ErrorKind::InvalidMember`]
    #[error("invalid member: {0}")]
    InvalidMember(String),
    /// See [`ErrorKind::InvalidDirective`]
    #[error("invalid directive: {0}")]
    InvalidDirective(String),
    /// See [`ErrorKind::VisibilityConflict`]
    #[error("visibility conflict: {0}")]
    VisibilityConflict(String),
    /// See [`ErrorKind::AbstractInstantiation`]
    #[error("trying to create an instance of an abstract class: {0}")]
    AbstractInstantiation(String),
    /// See [`ErrorKind::NotCallable`]
    #[error("not callable: {0}")]
    NotCallable(String),
    /// See [`ErrorKind::Runtime`]
    #[error("{0}")]
    Runtime(String),
}

impl ClassError {
    /// Create a runtime error, the kind user functions return.
    pub fn runtime(message: impl Into<String>) -> Self {
        ClassError::Runtime(message.into())
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClassError::DuplicateDefinition(_) => ErrorKind::DuplicateDefinition,
            ClassError::MissingDependency(_) => ErrorKind::MissingDependency,
            ClassError::InvalidOverride(_) => ErrorKind::InvalidOverride,
            ClassError::InvalidMixin(_) => ErrorKind::InvalidMixin,
            ClassError::InvalidMember(_) => ErrorKind::InvalidMember,
            ClassError::InvalidDirective(_) => ErrorKind::InvalidDirective,
            ClassError::VisibilityConflict(_) => ErrorKind::VisibilityConflict,
            ClassError::AbstractInstantiation(_) => ErrorKind::AbstractInstantiation,
            ClassError::NotCallable(_) => ErrorKind::NotCallable,
            ClassError::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// The message without the category prefix.
    pub fn message(&self) -> &str {
        match self {
            ClassError::DuplicateDefinition(m)
            | ClassError::MissingDependency(m)
            | ClassError::InvalidOverride(m)
            | ClassError::InvalidMixin(m)
            | ClassError::InvalidMember(m)
            | ClassError::InvalidDirective(m)
            | ClassError::VisibilityConflict(m)
            | ClassError::AbstractInstantiation(m)
            | ClassError::NotCallable(m)
            | ClassError::Runtime(m) => m,
        }
    }
}

/// Result type for class system operations
pub type ClassResult<T> = Result<T, ClassError>;
