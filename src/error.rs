use crate::TypeIdentity;
use std::fmt;

/// Errors that can occur when using the erased containers and function wrappers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnyError {
    /// Attempted to extract a value with a type that doesn't match what was stored.
    ///
    /// `found` is [`TypeIdentity::none()`] when the container was empty.
    TypeMismatch {
        expected: TypeIdentity,
        found: TypeIdentity,
    },
    /// Attempted to call a function wrapper that has no target
    EmptyFunction,
}

impl AnyError {
    pub(crate) fn mismatch<T: 'static>(found: TypeIdentity) -> Self {
        let expected = TypeIdentity::of::<T>();
        log::debug!("rejected extraction of {} from {}", expected, found);
        AnyError::TypeMismatch { expected, found }
    }
}

impl fmt::Display for AnyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AnyError::TypeMismatch { expected, found } if found.is_none() => {
                write!(f, "Type mismatch: expected {}, found an empty value", expected)
            }
            AnyError::TypeMismatch { expected, found } => {
                write!(f, "Type mismatch: expected {}, found {}", expected, found)
            }
            AnyError::EmptyFunction => write!(f, "Called a function wrapper with no target"),
        }
    }
}

impl std::error::Error for AnyError {}
