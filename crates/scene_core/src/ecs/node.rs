//! Hierarchical node implementation
//!
//! A [`Node`] exclusively owns its child nodes and its components. Ownership
//! flows strictly downward through `Arc`s; the `parent` and component `owner`
//! back-references are `Weak` so dropping a subtree never leaks a cycle.
//!
//! The attach operations are the only way entries enter the `children` and
//! `components` maps, and they are the point where identity uniqueness is
//! enforced and back-references are wired.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::{ComponentActivator, ComponentRef, NodeActivator, TreeError};
use crate::activation::{Activate, Arg, Instantiate};
use crate::foundation::Identity;

/// Tree vertex owning child nodes and components
#[derive(Debug)]
pub struct Node {
    id: Identity,
    name: String,
    active: AtomicBool,
    parent: RwLock<Weak<Node>>,
    pub(super) children: RwLock<HashMap<Identity, Arc<Node>>>,
    pub(super) components: RwLock<HashMap<Identity, ComponentRef>>,
}

impl Node {
    /// Create a detached node with a fresh identity
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            id: Identity::new(),
            name: name.into(),
            active: AtomicBool::new(true),
            parent: RwLock::new(Weak::new()),
            children: RwLock::new(HashMap::new()),
            components: RwLock::new(HashMap::new()),
        })
    }

    /// Identity assigned at construction
    pub fn id(&self) -> Identity {
        self.id
    }

    /// Descriptive name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the node is active
    ///
    /// Ancestor and descendant searches do not traverse through inactive nodes.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Activate or deactivate the node
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    /// Parent node, `None` for a root
    pub fn parent(&self) -> Option<Arc<Node>> {
        self.parent.read().upgrade()
    }

    /// Whether this node has no parent
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    /// Root of the tree this node belongs to (itself if it is a root)
    pub fn root(self: &Arc<Self>) -> Arc<Node> {
        let mut current = Arc::clone(self);
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Snapshot of the direct children
    pub fn children(&self) -> Vec<Arc<Node>> {
        self.children.read().values().cloned().collect()
    }

    /// Snapshot of the components attached directly to this node
    pub fn components(&self) -> Vec<ComponentRef> {
        self.components.read().values().cloned().collect()
    }

    /// Number of direct children
    pub fn child_count(&self) -> usize {
        self.children.read().len()
    }

    /// Number of components attached directly to this node
    pub fn component_count(&self) -> usize {
        self.components.read().len()
    }

    fn has_ancestor(&self, id: Identity) -> bool {
        let mut current = self.parent();
        while let Some(node) = current {
            if node.id == id {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Attach a detached node as a direct child
    ///
    /// Fails with [`TreeError::Duplicate`] when a node with the same identity
    /// already exists anywhere in this subtree or is still attached to another
    /// parent, and with [`TreeError::InvalidArgument`] when `child` is this
    /// node or one of its ancestors.
    pub fn attach_child(self: &Arc<Self>, child: Arc<Node>) -> Result<(), TreeError> {
        if child.id == self.id || self.has_ancestor(child.id) {
            log::warn!("Rejected attaching node {} beneath itself", child.id);
            return Err(TreeError::InvalidArgument(format!(
                "node {} cannot become its own descendant",
                child.id
            )));
        }

        if let Some(existing) = self.find_child_recursive(child.id) {
            let holder = existing.parent().map_or(self.id, |p| p.id);
            return Err(TreeError::Duplicate { id: child.id, holder });
        }

        if let Some(parent) = child.parent() {
            return Err(TreeError::Duplicate {
                id: child.id,
                holder: parent.id,
            });
        }

        match self.children.write().entry(child.id) {
            Entry::Occupied(_) => {
                return Err(TreeError::Duplicate {
                    id: child.id,
                    holder: self.id,
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&child));
            }
        }

        *child.parent.write() = Arc::downgrade(self);
        log::trace!(
            "Attached node '{}' ({}) to '{}' ({})",
            child.name,
            child.id,
            self.name,
            self.id
        );
        Ok(())
    }

    /// Attach several nodes in order, stopping at the first failure
    pub fn attach_children(
        self: &Arc<Self>,
        children: impl IntoIterator<Item = Arc<Node>>,
    ) -> Result<(), TreeError> {
        children
            .into_iter()
            .try_for_each(|child| self.attach_child(child))
    }

    /// Remove a direct child, handing it back to the caller
    ///
    /// Only this level is searched. The removed child's parent reference is
    /// cleared; its own subtree is left intact.
    pub fn detach_child(&self, id: Identity) -> Option<Arc<Node>> {
        let removed = self.children.write().remove(&id)?;
        *removed.parent.write() = Weak::new();
        log::trace!("Detached node {} from {}", id, self.id);
        Some(removed)
    }

    /// Direct child lookup
    pub fn find_child(&self, id: Identity) -> Option<Arc<Node>> {
        self.children.read().get(&id).cloned()
    }

    /// Depth-first lookup over the whole subtree below this node
    pub fn find_child_recursive(&self, id: Identity) -> Option<Arc<Node>> {
        if let Some(child) = self.find_child(id) {
            return Some(child);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_child_recursive(id))
    }

    /// Instantiate `T` through its zero-argument constructor and attach it as a child
    pub fn create_and_attach_child<T>(
        self: &Arc<Self>,
        activator: &NodeActivator,
    ) -> Result<Arc<Node>, TreeError>
    where
        T: Activate<Arc<Node>>,
    {
        self.create_and_attach_child_with::<T>(activator, Vec::new())
    }

    /// Instantiate `T` with constructor arguments and attach it as a child
    pub fn create_and_attach_child_with<T>(
        self: &Arc<Self>,
        activator: &NodeActivator,
        args: Vec<Arg>,
    ) -> Result<Arc<Node>, TreeError>
    where
        T: Activate<Arc<Node>>,
    {
        let child = activator.create_with::<T>(args)?;
        self.attach_child(Arc::clone(&child))?;
        Ok(child)
    }

    /// Attach a detached component to this node
    ///
    /// Fails with [`TreeError::Duplicate`] when the component is already
    /// present anywhere in this subtree or still owned by another node.
    pub fn attach_component(self: &Arc<Self>, component: ComponentRef) -> Result<(), TreeError> {
        let id = component.id();

        if let Some(existing) = self.find_component_recursive(id) {
            let holder = existing.owner().map_or(self.id, |owner| owner.id);
            return Err(TreeError::Duplicate { id, holder });
        }

        if let Some(owner) = component.owner() {
            return Err(TreeError::Duplicate {
                id,
                holder: owner.id,
            });
        }

        match self.components.write().entry(id) {
            Entry::Occupied(_) => {
                return Err(TreeError::Duplicate {
                    id,
                    holder: self.id,
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(Arc::clone(&component));
            }
        }

        component.core().set_owner(self);
        log::trace!(
            "Attached component '{}' ({}) to node {}",
            component.name(),
            id,
            self.id
        );
        Ok(())
    }

    /// Attach several components in order, stopping at the first failure
    pub fn attach_components(
        self: &Arc<Self>,
        components: impl IntoIterator<Item = ComponentRef>,
    ) -> Result<(), TreeError> {
        components
            .into_iter()
            .try_for_each(|component| self.attach_component(component))
    }

    /// Remove a component attached directly to this node
    ///
    /// The removed component's owner reference is cleared.
    pub fn detach_component(&self, id: Identity) -> Option<ComponentRef> {
        let removed = self.components.write().remove(&id)?;
        removed.core().clear_owner();
        log::trace!("Detached component {} from node {}", id, self.id);
        Some(removed)
    }

    /// Component lookup on this node only
    pub fn find_component(&self, id: Identity) -> Option<ComponentRef> {
        self.components.read().get(&id).cloned()
    }

    /// Component lookup on this node, then depth-first through the subtree
    pub fn find_component_recursive(&self, id: Identity) -> Option<ComponentRef> {
        if let Some(component) = self.find_component(id) {
            return Some(component);
        }
        self.children()
            .iter()
            .find_map(|child| child.find_component_recursive(id))
    }

    /// Instantiate `T` through its zero-argument constructor and attach it
    pub fn create_and_attach_component<T>(
        self: &Arc<Self>,
        activator: &ComponentActivator,
    ) -> Result<ComponentRef, TreeError>
    where
        T: Activate<ComponentRef>,
    {
        self.create_and_attach_component_with::<T>(activator, Vec::new())
    }

    /// Instantiate `T` with constructor arguments and attach it
    pub fn create_and_attach_component_with<T>(
        self: &Arc<Self>,
        activator: &ComponentActivator,
        args: Vec<Arg>,
    ) -> Result<ComponentRef, TreeError>
    where
        T: Activate<ComponentRef>,
    {
        let component = activator.create_with::<T>(args)?;
        self.attach_component(Arc::clone(&component))?;
        Ok(component)
    }
}

impl Instantiate<Arc<Node>> for Arc<Node> {
    fn instantiate(value: Arc<Node>) -> Self {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::ComponentCore;
    use crate::ecs::Component;

    struct Marker {
        core: ComponentCore,
    }

    impl Marker {
        fn shared() -> ComponentRef {
            Arc::new(Self {
                core: ComponentCore::new("marker"),
            })
        }
    }

    impl Component for Marker {
        fn core(&self) -> &ComponentCore {
            &self.core
        }
    }

    #[test]
    fn test_new_node_is_root() {
        let node = Node::new("solo");
        assert!(node.is_root());
        assert!(node.is_active());
        assert_eq!(node.root().id(), node.id());
        assert_eq!(node.child_count(), 0);
        assert_eq!(node.component_count(), 0);
    }

    #[test]
    fn test_attach_child_sets_parent() {
        let root = Node::new("root");
        let child = Node::new("child");

        root.attach_child(Arc::clone(&child)).unwrap();

        assert_eq!(child.parent().unwrap().id(), root.id());
        assert_eq!(root.find_child(child.id()).unwrap().id(), child.id());
        assert!(!child.is_root());
    }

    #[test]
    fn test_attach_child_twice_is_duplicate() {
        let root = Node::new("root");
        let child = Node::new("child");

        root.attach_child(Arc::clone(&child)).unwrap();
        let err = root.attach_child(Arc::clone(&child)).unwrap_err();

        assert!(matches!(err, TreeError::Duplicate { id, holder } if id == child.id() && holder == root.id()));
        assert_eq!(root.child_count(), 1);
    }

    #[test]
    fn test_attach_child_found_deeper_is_duplicate() {
        let root = Node::new("root");
        let middle = Node::new("middle");
        let leaf = Node::new("leaf");
        root.attach_child(Arc::clone(&middle)).unwrap();
        middle.attach_child(Arc::clone(&leaf)).unwrap();

        let err = root.attach_child(Arc::clone(&leaf)).unwrap_err();
        assert!(matches!(err, TreeError::Duplicate { holder, .. } if holder == middle.id()));
        assert_eq!(leaf.parent().unwrap().id(), middle.id());
    }

    #[test]
    fn test_attach_self_or_ancestor_is_invalid() {
        let root = Node::new("root");
        let child = Node::new("child");
        root.attach_child(Arc::clone(&child)).unwrap();

        assert!(matches!(
            root.attach_child(Arc::clone(&root)),
            Err(TreeError::InvalidArgument(_))
        ));
        assert!(matches!(
            child.attach_child(Arc::clone(&root)),
            Err(TreeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_detach_child_returns_subtree_and_clears_parent() {
        let root = Node::new("root");
        let child = Node::new("child");
        let grandchild = Node::new("grandchild");
        root.attach_child(Arc::clone(&child)).unwrap();
        child.attach_child(Arc::clone(&grandchild)).unwrap();

        let removed = root.detach_child(child.id()).unwrap();

        assert_eq!(removed.id(), child.id());
        assert!(removed.is_root());
        assert!(root.find_child_recursive(grandchild.id()).is_none());
        assert_eq!(removed.find_child(grandchild.id()).unwrap().id(), grandchild.id());
    }

    #[test]
    fn test_detach_child_is_one_level_only() {
        let root = Node::new("root");
        let child = Node::new("child");
        let grandchild = Node::new("grandchild");
        root.attach_child(Arc::clone(&child)).unwrap();
        child.attach_child(Arc::clone(&grandchild)).unwrap();

        assert!(root.detach_child(grandchild.id()).is_none());
        assert!(root.find_child_recursive(grandchild.id()).is_some());
    }

    #[test]
    fn test_attach_component_sets_owner() {
        let node = Node::new("node");
        let marker = Marker::shared();

        node.attach_component(Arc::clone(&marker)).unwrap();

        assert_eq!(marker.owner().unwrap().id(), node.id());
        assert_eq!(node.find_component(marker.id()).unwrap().id(), marker.id());
    }

    #[test]
    fn test_attach_component_already_owned_elsewhere_is_duplicate() {
        let root = Node::new("root");
        let left = Node::new("left");
        let right = Node::new("right");
        root.attach_children([Arc::clone(&left), Arc::clone(&right)]).unwrap();

        let marker = Marker::shared();
        left.attach_component(Arc::clone(&marker)).unwrap();

        let err = right.attach_component(Arc::clone(&marker)).unwrap_err();
        assert!(matches!(err, TreeError::Duplicate { holder, .. } if holder == left.id()));
        assert_eq!(marker.owner().unwrap().id(), left.id());
        assert_eq!(right.component_count(), 0);
    }

    #[test]
    fn test_detach_component_clears_owner() {
        let node = Node::new("node");
        let marker = Marker::shared();
        node.attach_component(Arc::clone(&marker)).unwrap();

        let removed = node.detach_component(marker.id()).unwrap();

        assert!(removed.owner().is_none());
        assert!(node.find_component(marker.id()).is_none());
        assert!(node.detach_component(marker.id()).is_none());
    }

    #[test]
    fn test_find_component_recursive_searches_subtree() {
        let root = Node::new("root");
        let child = Node::new("child");
        let grandchild = Node::new("grandchild");
        root.attach_child(Arc::clone(&child)).unwrap();
        child.attach_child(Arc::clone(&grandchild)).unwrap();

        let marker = Marker::shared();
        grandchild.attach_component(Arc::clone(&marker)).unwrap();

        assert!(root.find_component(marker.id()).is_none());
        assert_eq!(root.find_component_recursive(marker.id()).unwrap().id(), marker.id());
    }
}
