//! Per-frame scene passes

use std::fmt;
use std::sync::Arc;

use crate::ecs::{ComponentRef, Node};
use crate::foundation::{FrameTime, Identity};

/// When a pass runs within a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PassPhase {
    /// Game logic
    Update,
    /// Drawing
    Render,
}

impl fmt::Display for PassPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => write!(f, "update"),
            Self::Render => write!(f, "render"),
        }
    }
}

/// A unit of per-frame work over the scene tree
pub trait ScenePass: Send + Sync {
    /// Identity used to reject double registration
    fn id(&self) -> Identity;

    /// Display name
    fn name(&self) -> &str;

    /// Phase the pass belongs to
    fn phase(&self) -> PassPhase;

    /// Called once when the pass is added to a scene
    fn init(&mut self, _root: &Arc<Node>) {}

    /// Process one frame
    fn run(&mut self, root: &Arc<Node>, frame: FrameTime);

    /// Called once when the pass is removed or the scene is dropped
    fn destroy(&mut self) {}

    /// Total number of components this pass has processed
    fn processed(&self) -> u64;
}

/// Visit every active component of every active node, depth first
///
/// A node that is inactive hides its whole subtree.
pub fn for_each_active_component(node: &Node, visit: &mut impl FnMut(&ComponentRef)) {
    if !node.is_active() {
        return;
    }
    for component in node.components().iter().filter(|c| c.is_active()) {
        visit(component);
    }
    for child in node.children() {
        for_each_active_component(&child, visit);
    }
}

/// Calls [`Updateable::update`](crate::ecs::Updateable::update) on the active tree
#[derive(Debug)]
pub struct SceneUpdater {
    id: Identity,
    processed: u64,
}

impl SceneUpdater {
    /// Create an updater pass
    pub fn new() -> Self {
        Self {
            id: Identity::new(),
            processed: 0,
        }
    }
}

impl Default for SceneUpdater {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenePass for SceneUpdater {
    fn id(&self) -> Identity {
        self.id
    }

    fn name(&self) -> &str {
        "SceneUpdater"
    }

    fn phase(&self) -> PassPhase {
        PassPhase::Update
    }

    fn run(&mut self, root: &Arc<Node>, frame: FrameTime) {
        let mut processed = 0;
        for_each_active_component(root, &mut |component| {
            if let Some(updateable) = component.as_updateable() {
                updateable.update(frame);
                processed += 1;
            }
        });
        self.processed += processed;
    }

    fn processed(&self) -> u64 {
        self.processed
    }
}

/// Calls [`Renderable::render`](crate::ecs::Renderable::render) on the active tree
#[derive(Debug)]
pub struct SceneRenderer {
    id: Identity,
    processed: u64,
}

impl SceneRenderer {
    /// Create a renderer pass
    pub fn new() -> Self {
        Self {
            id: Identity::new(),
            processed: 0,
        }
    }
}

impl Default for SceneRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ScenePass for SceneRenderer {
    fn id(&self) -> Identity {
        self.id
    }

    fn name(&self) -> &str {
        "SceneRenderer"
    }

    fn phase(&self) -> PassPhase {
        PassPhase::Render
    }

    fn run(&mut self, root: &Arc<Node>, frame: FrameTime) {
        let mut processed = 0;
        for_each_active_component(root, &mut |component| {
            if let Some(renderable) = component.as_renderable() {
                renderable.render(frame);
                processed += 1;
            }
        });
        self.processed += processed;
    }

    fn processed(&self) -> u64 {
        self.processed
    }
}
