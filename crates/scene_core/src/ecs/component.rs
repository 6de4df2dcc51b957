//! Component trait and the state every component carries
//!
//! A component is a leaf value attached to exactly one [`Node`]. Concrete
//! component types embed a [`ComponentCore`] and implement [`Component`] by
//! returning it; everything else (identity, name, active flag, owner
//! back-reference) is provided.

use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use super::Node;
use crate::activation::Instantiate;
use crate::foundation::{FrameTime, Identity};

/// Shared handle to a component of any concrete type
pub type ComponentRef = Arc<dyn Component>;

/// Upcast helper so trait objects can be downcast to their concrete type
pub trait AsAny: Any + Send + Sync {
    /// Borrow as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// Convert a shared handle into `Arc<dyn Any>`
    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

/// State shared by every component
#[derive(Debug)]
pub struct ComponentCore {
    id: Identity,
    name: String,
    active: AtomicBool,
    owner: RwLock<Weak<Node>>,
}

impl ComponentCore {
    /// Create detached component state with a fresh identity
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Identity::new(),
            name: name.into(),
            active: AtomicBool::new(true),
            owner: RwLock::new(Weak::new()),
        }
    }

    /// Identity assigned at construction
    pub fn id(&self) -> Identity {
        self.id
    }

    /// Descriptive name (not unique)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the component is active
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Activate or deactivate the component
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);
    }

    /// Owning node, if attached and still alive
    pub fn owner(&self) -> Option<Arc<Node>> {
        self.owner.read().upgrade()
    }

    pub(crate) fn set_owner(&self, owner: &Arc<Node>) {
        *self.owner.write() = Arc::downgrade(owner);
    }

    pub(crate) fn clear_owner(&self) {
        *self.owner.write() = Weak::new();
    }
}

/// Per-frame update hook
pub trait Updateable {
    /// Advance the component by one frame
    fn update(&self, frame: FrameTime);
}

/// Per-frame render hook
pub trait Renderable {
    /// Render the component for one frame
    fn render(&self, frame: FrameTime);
}

/// A capability unit attachable to a [`Node`]
pub trait Component: AsAny {
    /// Shared component state
    fn core(&self) -> &ComponentCore;

    /// Identity assigned at construction
    fn id(&self) -> Identity {
        self.core().id()
    }

    /// Descriptive name
    fn name(&self) -> &str {
        self.core().name()
    }

    /// Whether the component is active
    fn is_active(&self) -> bool {
        self.core().is_active()
    }

    /// Activate or deactivate the component
    fn set_active(&self, active: bool) {
        self.core().set_active(active);
    }

    /// Owning node, if attached
    fn owner(&self) -> Option<Arc<Node>> {
        self.core().owner()
    }

    /// Update capability, if the component has one
    fn as_updateable(&self) -> Option<&dyn Updateable> {
        None
    }

    /// Render capability, if the component has one
    fn as_renderable(&self) -> Option<&dyn Renderable> {
        None
    }
}

impl dyn Component {
    /// Whether the concrete type is `T`
    pub fn is<T: Component>(&self) -> bool {
        AsAny::as_any(self).is::<T>()
    }

    /// Borrow as the concrete type `T`
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        AsAny::as_any(self).downcast_ref::<T>()
    }
}

impl fmt::Debug for dyn Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.id())
            .field("name", &self.name())
            .field("active", &self.is_active())
            .finish()
    }
}

/// Convert a shared component handle into a handle of its concrete type
pub fn downcast_component<T: Component>(component: ComponentRef) -> Option<Arc<T>> {
    <dyn Component as AsAny>::into_any_arc(component)
        .downcast::<T>()
        .ok()
}

impl<T: Component> Instantiate<T> for ComponentRef {
    fn instantiate(value: T) -> Self {
        Arc::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        core: ComponentCore,
    }

    impl Component for Probe {
        fn core(&self) -> &ComponentCore {
            &self.core
        }
    }

    struct Other {
        core: ComponentCore,
    }

    impl Component for Other {
        fn core(&self) -> &ComponentCore {
            &self.core
        }
    }

    #[test]
    fn test_new_component_is_detached_and_active() {
        let probe = Probe {
            core: ComponentCore::new("probe"),
        };

        assert!(probe.is_active());
        assert!(probe.owner().is_none());
        assert_eq!(probe.name(), "probe");
    }

    #[test]
    fn test_downcast_matches_concrete_type_only() {
        let component: ComponentRef = Arc::new(Probe {
            core: ComponentCore::new("probe"),
        });

        assert!(component.is::<Probe>());
        assert!(!component.is::<Other>());
        assert!(component.downcast_ref::<Probe>().is_some());

        let id = component.id();
        let probe = downcast_component::<Probe>(Arc::clone(&component)).unwrap();
        assert_eq!(probe.id(), id);
        assert!(downcast_component::<Other>(component).is_none());
    }

    #[test]
    fn test_set_active_toggles() {
        let probe = Probe {
            core: ComponentCore::new("probe"),
        };
        probe.set_active(false);
        assert!(!probe.is_active());
        probe.set_active(true);
        assert!(probe.is_active());
    }
}
