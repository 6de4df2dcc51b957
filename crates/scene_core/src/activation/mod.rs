//! Runtime activation of registered types
//!
//! Types opt in by implementing [`Activate`], listing their constructors
//! once. The [`Activator`] caches those constructors per type and per
//! argument signature; the [`Factory`] layers caller-chosen keys on top.

pub mod activator;
pub mod args;
pub mod error;
pub mod factory;
pub mod table;

pub use activator::{Activate, Activator, TypeKey};
pub use args::{signature_of, Arg, ConstructorArgs};
pub use error::{ActivationError, BoxError};
pub use factory::{Factory, FactoryError};
pub use table::{ConstructorTable, Instantiate, Invoker};
