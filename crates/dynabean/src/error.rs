//! Dispatch and copy errors

use crate::types::Type;
use crate::value::Value;
use thiserror::Error;

/// Result type for dynabean operations
pub type BeanResult<T> = Result<T, BeanError>;

/// Errors that can occur while invoking methods on a dynabean
///
/// Every error is local to the call that raised it. A failed setter never
/// leaves a partial write behind.
#[derive(Debug, Error)]
pub enum BeanError {
    /// A getter or setter was invoked with the wrong number of arguments
    #[error("Expected {expected} argument(s), got: {actual}")]
    ArgumentCount {
        /// Number of arguments the behavior accepts
        expected: usize,
        /// Rendering of the arguments that were supplied
        actual: String,
    },

    /// A stored or supplied value does not conform to the declared type
    #[error("{value} is not an instance of type: {expected}")]
    TypeMismatch {
        /// Rendering of the offending value
        value: String,
        /// Declared type of the property
        expected: Type,
    },

    /// The method has no behavior and is not an identity operation
    #[error("Unimplemented dynabean method: {method}")]
    UnsupportedOperation {
        /// Qualified method name (`Contract.method/arity`)
        method: String,
    },

    /// A host value's copy capability failed during a deep copy
    #[error("Failed to clone value of type {type_name}: {source}")]
    CopyFailure {
        /// Host type whose copy failed
        type_name: String,
        /// The error raised by the copy capability
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Deep copy descended past the configured depth bound
    #[error("Deep copy exceeded the maximum depth of {limit}")]
    CopyDepthExceeded {
        /// Configured bound
        limit: usize,
    },

    /// A default method body could not be captured for its contract
    #[error("Cannot capture default method {contract}.{method}: {reason}")]
    Introspection {
        /// Contract declaring the method
        contract: String,
        /// Method name
        method: String,
        /// Why the body is not available
        reason: String,
    },

    /// Failure raised by a default method body
    #[error("{0}")]
    Custom(String),
}

impl BeanError {
    /// Build an argument count error listing the supplied arguments
    pub fn argument_count(expected: usize, args: &[Value]) -> Self {
        let rendered: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        BeanError::ArgumentCount {
            expected,
            actual: format!("[{}]", rendered.join(", ")),
        }
    }

    /// Build a type mismatch error for `value` against `expected`
    pub fn type_mismatch(value: &Value, expected: &Type) -> Self {
        BeanError::TypeMismatch {
            value: value.to_string(),
            expected: expected.clone(),
        }
    }
}

impl From<String> for BeanError {
    fn from(s: String) -> Self {
        BeanError::Custom(s)
    }
}

impl From<&str> for BeanError {
    fn from(s: &str) -> Self {
        BeanError::Custom(s.to_string())
    }
}
