//! Activation error types

use thiserror::Error;

/// Boxed error produced by a fallible constructor
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while creating an instance from a runtime-known type
#[derive(Error, Debug)]
pub enum ActivationError {
    /// The type is abstract or unknown and can never be instantiated
    #[error("Type '{type_name}' cannot be activated: {reason}")]
    NotActivatable {
        /// Fully-qualified name of the requested type
        type_name: String,
        /// Why activation was refused
        reason: String,
    },

    /// No constructor takes the given argument types
    #[error("Type '{type_name}' has no constructor taking ({signature})")]
    NoMatchingConstructor {
        /// Fully-qualified name of the requested type
        type_name: String,
        /// Comma-joined argument type names
        signature: String,
    },

    /// A constructor was found but returned an error
    #[error("Constructing '{type_name}' failed: {source}")]
    Construction {
        /// Fully-qualified name of the requested type
        type_name: String,
        /// Error raised by the constructor body
        #[source]
        source: BoxError,
    },
}

impl ActivationError {
    /// Create a `NotActivatable` error
    pub fn not_activatable(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotActivatable {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a `NoMatchingConstructor` error
    pub fn no_matching_constructor(type_name: impl Into<String>, signature: impl Into<String>) -> Self {
        Self::NoMatchingConstructor {
            type_name: type_name.into(),
            signature: signature.into(),
        }
    }
}
