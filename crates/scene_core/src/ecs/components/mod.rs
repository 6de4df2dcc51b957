//! Built-in components
//!
//! Concrete components shipped with the crate. Applications define their own
//! by embedding a [`ComponentCore`](crate::ecs::ComponentCore) and
//! implementing [`Component`](crate::ecs::Component).

pub mod behaviour;
pub mod transform;

pub use behaviour::Behaviour;
pub use transform::{Transform, TransformState};
