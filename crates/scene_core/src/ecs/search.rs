//! Typed component search across a node, its ancestors and its descendants
//!
//! Every search has an exclusion-aware form taking a slice of identities to
//! skip, and a convenience form without exclusions. Searches are total:
//! nothing found is `None` or an empty `Vec`, never an error.
//!
//! No result order is guaranteed. "First" means some matching member of a
//! node's component map.

use std::sync::Arc;

use super::component::downcast_component;
use super::{Component, ComponentRef, Node};
use crate::foundation::Identity;

fn matching<T: Component>(component: &ComponentRef, excluded: &[Identity]) -> Option<Arc<T>> {
    if excluded.contains(&component.id()) {
        return None;
    }
    downcast_component::<T>(Arc::clone(component))
}

impl Node {
    /// First component of type `T` on this node
    pub fn get_component<T: Component>(&self) -> Option<Arc<T>> {
        self.get_component_excluding::<T>(&[])
    }

    /// First component of type `T` on this node whose identity is not excluded
    pub fn get_component_excluding<T: Component>(&self, excluded: &[Identity]) -> Option<Arc<T>> {
        self.components
            .read()
            .values()
            .find_map(|component| matching::<T>(component, excluded))
    }

    /// Every component of type `T` on this node
    pub fn get_components<T: Component>(&self) -> Vec<Arc<T>> {
        self.get_components_excluding::<T>(&[])
    }

    /// Every component of type `T` on this node whose identity is not excluded
    pub fn get_components_excluding<T: Component>(&self, excluded: &[Identity]) -> Vec<Arc<T>> {
        self.components
            .read()
            .values()
            .filter_map(|component| matching::<T>(component, excluded))
            .collect()
    }

    /// First component of type `T` on this node, then up the chain of active ancestors
    pub fn get_component_from_parents<T: Component>(&self) -> Option<Arc<T>> {
        self.get_component_from_parents_excluding::<T>(&[])
    }

    /// Ancestor search with exclusions
    ///
    /// The walk stops at the first inactive ancestor.
    pub fn get_component_from_parents_excluding<T: Component>(
        &self,
        excluded: &[Identity],
    ) -> Option<Arc<T>> {
        self.get_component_excluding::<T>(excluded).or_else(|| {
            self.parent()
                .filter(|parent| parent.is_active())
                .and_then(|parent| parent.get_component_from_parents_excluding::<T>(excluded))
        })
    }

    /// Components of type `T` on this node and on its parent, if the parent is active
    pub fn get_components_from_parents<T: Component>(&self) -> Vec<Arc<T>> {
        self.get_components_from_parents_excluding::<T>(&[])
    }

    /// Two-level union: this node's matches plus the active parent's own matches
    ///
    /// Unlike [`Node::get_component_from_parents_excluding`] this does not
    /// continue past the parent.
    pub fn get_components_from_parents_excluding<T: Component>(
        &self,
        excluded: &[Identity],
    ) -> Vec<Arc<T>> {
        let mut found = self.get_components_excluding::<T>(excluded);
        if let Some(parent) = self.parent().filter(|parent| parent.is_active()) {
            found.extend(parent.get_components_excluding::<T>(excluded));
        }
        found
    }

    /// First component of type `T` on this node, then depth-first through active children
    pub fn get_component_from_children<T: Component>(&self) -> Option<Arc<T>> {
        self.get_component_from_children_excluding::<T>(&[])
    }

    /// Descendant search with exclusions; inactive children are not entered
    pub fn get_component_from_children_excluding<T: Component>(
        &self,
        excluded: &[Identity],
    ) -> Option<Arc<T>> {
        self.get_component_excluding::<T>(excluded).or_else(|| {
            self.children()
                .iter()
                .filter(|child| child.is_active())
                .find_map(|child| child.get_component_from_children_excluding::<T>(excluded))
        })
    }

    /// Every component of type `T` on this node and its active subtree
    pub fn get_components_from_children<T: Component>(&self) -> Vec<Arc<T>> {
        self.get_components_from_children_excluding::<T>(&[])
    }

    /// Active-subtree union with exclusions
    ///
    /// A node behind an inactive node contributes nothing, even if it is active itself.
    pub fn get_components_from_children_excluding<T: Component>(
        &self,
        excluded: &[Identity],
    ) -> Vec<Arc<T>> {
        let mut found = self.get_components_excluding::<T>(excluded);
        for child in self.children().iter().filter(|child| child.is_active()) {
            found.extend(child.get_components_from_children_excluding::<T>(excluded));
        }
        found
    }
}
