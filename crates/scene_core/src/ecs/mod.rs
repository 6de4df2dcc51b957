//! Node/component tree
//!
//! Nodes own child nodes and components; components are leaf capability
//! units. Attach operations enforce identity uniqueness and wire the
//! back-references, typed searches walk the tree honouring activity.

pub mod component;
pub mod components;
pub mod error;
pub mod kinds;
pub mod node;
mod search;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use crate::activation::Activator;

pub use component::{downcast_component, AsAny, Component, ComponentCore, ComponentRef, Renderable, Updateable};
pub use components::{Behaviour, Transform};
pub use error::TreeError;
pub use kinds::{GameObject, PlainNode};
pub use node::Node;

/// Activation cache producing nodes
pub type NodeActivator = Activator<Arc<Node>>;

/// Activation cache producing shared components
pub type ComponentActivator = Activator<ComponentRef>;
