//! Node kinds known to the activation cache
//!
//! Every node is a [`Node`]; a kind is a marker type describing how to build
//! one. [`PlainNode`] builds an empty node, [`GameObject`] builds a node that
//! already carries a [`Transform`].

use std::sync::Arc;

use crate::activation::{Activate, ConstructorTable};
use crate::ecs::{Node, Transform, TreeError};
use crate::foundation::math::Vec3;

/// An empty node
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNode;

impl PlainNode {
    /// Name given to nodes created without one
    pub const DEFAULT_NAME: &'static str = "Node";
}

impl Activate<Arc<Node>> for PlainNode {
    fn constructors(table: &mut ConstructorTable<Arc<Node>>) {
        table
            .constructor(|()| Node::new(Self::DEFAULT_NAME))
            .constructor(|(name,): (String,)| Node::new(name));
    }
}

/// A node with a [`Transform`] component attached at creation
#[derive(Debug, Clone, Copy, Default)]
pub struct GameObject;

impl GameObject {
    /// Name given to game objects created without one
    pub const DEFAULT_NAME: &'static str = "GameObject";

    /// Build a game object whose transform starts at `position`
    pub fn build(name: impl Into<String>, position: Vec3) -> Result<Arc<Node>, TreeError> {
        let node = Node::new(name);
        node.attach_component(Arc::new(Transform::from_position(position)))?;
        Ok(node)
    }
}

impl Activate<Arc<Node>> for GameObject {
    fn constructors(table: &mut ConstructorTable<Arc<Node>>) {
        table
            .fallible_constructor(|()| Self::build(Self::DEFAULT_NAME, Vec3::zeros()))
            .fallible_constructor(|(name,): (String,)| Self::build(name, Vec3::zeros()))
            .fallible_constructor(|(name, position): (String, Vec3)| Self::build(name, position));
    }
}
