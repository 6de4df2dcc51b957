//! Tree mutation errors

use thiserror::Error;

use crate::activation::ActivationError;
use crate::foundation::Identity;

/// Errors raised by attach operations on the node tree
///
/// Lookups never fail: absence is an empty `Option`/`Vec`.
#[derive(Error, Debug)]
pub enum TreeError {
    /// A required value was unusable (for example attaching a node beneath itself)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The identity is already attached, either inside the destination subtree or elsewhere
    #[error("Identity {id} is already attached under node {holder}")]
    Duplicate {
        /// Identity that was being attached
        id: Identity,
        /// Node currently holding that identity
        holder: Identity,
    },

    /// Creating the value to attach failed
    #[error(transparent)]
    Activation(#[from] ActivationError),
}
