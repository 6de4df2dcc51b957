//! Behaviour component: the simplest updateable component

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::activation::{Activate, ConstructorTable};
use crate::ecs::{Component, ComponentCore, ComponentRef, Updateable};
use crate::foundation::FrameTime;

/// Records the frames it has been updated with
#[derive(Debug)]
pub struct Behaviour {
    core: ComponentCore,
    last_elapsed: Mutex<Option<f64>>,
    updates: AtomicU64,
}

impl Behaviour {
    /// Component name used for every behaviour
    pub const NAME: &'static str = "Behaviour";

    /// Create a behaviour that has not been updated yet
    pub fn new() -> Self {
        Self {
            core: ComponentCore::new(Self::NAME),
            last_elapsed: Mutex::new(None),
            updates: AtomicU64::new(0),
        }
    }

    /// Elapsed time of the most recent update
    pub fn last_elapsed(&self) -> Option<f64> {
        *self.last_elapsed.lock()
    }

    /// Number of updates received
    pub fn update_count(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }
}

impl Default for Behaviour {
    fn default() -> Self {
        Self::new()
    }
}

impl Updateable for Behaviour {
    fn update(&self, frame: FrameTime) {
        *self.last_elapsed.lock() = Some(frame.elapsed);
        self.updates.fetch_add(1, Ordering::Relaxed);
    }
}

impl Component for Behaviour {
    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn as_updateable(&self) -> Option<&dyn Updateable> {
        Some(self)
    }
}

impl Activate<ComponentRef> for Behaviour {
    fn constructors(table: &mut ConstructorTable<ComponentRef>) {
        table.constructor(|()| Self::new());
    }
}
