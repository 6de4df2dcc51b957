//! Scene: a root node, its passes and the activators that populate it

use std::fmt;
use std::sync::Arc;

use super::passes::{PassPhase, SceneRenderer, ScenePass, SceneUpdater};
use super::SceneError;
use crate::activation::Activate;
use crate::config::SceneConfig;
use crate::ecs::{ComponentActivator, ComponentRef, Node, NodeActivator};
use crate::foundation::{FrameClock, FrameTime, Identity, LogSink, MessageLevel};

/// Snapshot of scene counters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStats {
    /// Frames ticked so far
    pub frames: u64,
    /// Nodes in the tree, root included
    pub nodes: usize,
    /// Components attached anywhere in the tree
    pub components: usize,
    /// Average frames per second since the clock started
    pub average_fps: f64,
}

/// Owns the root of a node tree and drives passes over it
pub struct Scene {
    root: Arc<Node>,
    passes: Vec<Box<dyn ScenePass>>,
    nodes: Arc<NodeActivator>,
    components: Arc<ComponentActivator>,
    sink: Arc<dyn LogSink>,
    clock: FrameClock,
}

impl Scene {
    /// Create an empty scene with a wall-clock frame clock and no passes
    pub fn new(root_name: impl Into<String>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            root: Node::new(root_name),
            passes: Vec::new(),
            nodes: Arc::new(NodeActivator::new()),
            components: Arc::new(ComponentActivator::new()),
            sink,
            clock: FrameClock::new(),
        }
    }

    /// Create a scene from validated configuration, installing the configured passes
    pub fn from_config(config: &SceneConfig, sink: Arc<dyn LogSink>) -> Result<Self, SceneError> {
        config.validate()?;

        let mut scene = Self::new(config.root_name.clone(), sink);
        if let Some(delta) = config.frame.fixed_delta {
            scene.clock = FrameClock::fixed(delta);
        }
        if config.passes.updater {
            scene.add_pass(Box::new(SceneUpdater::new()))?;
        }
        if config.passes.renderer {
            scene.add_pass(Box::new(SceneRenderer::new()))?;
        }
        Ok(scene)
    }

    /// Share existing activators instead of the scene's own
    #[must_use]
    pub fn with_activators(
        mut self,
        nodes: Arc<NodeActivator>,
        components: Arc<ComponentActivator>,
    ) -> Self {
        self.nodes = nodes;
        self.components = components;
        self
    }

    /// Replace the frame clock
    #[must_use]
    pub fn with_clock(mut self, clock: FrameClock) -> Self {
        self.clock = clock;
        self
    }

    /// Root node
    pub fn root(&self) -> &Arc<Node> {
        &self.root
    }

    /// Activator used by [`Scene::create_node`]
    pub fn node_activator(&self) -> &Arc<NodeActivator> {
        &self.nodes
    }

    /// Activator used by [`Scene::create_component`]
    pub fn component_activator(&self) -> &Arc<ComponentActivator> {
        &self.components
    }

    /// Message sink
    pub fn sink(&self) -> &Arc<dyn LogSink> {
        &self.sink
    }

    /// Install a pass after the existing ones and initialise it
    pub fn add_pass(&mut self, mut pass: Box<dyn ScenePass>) -> Result<(), SceneError> {
        let id = pass.id();
        if self.passes.iter().any(|existing| existing.id() == id) {
            self.sink.log(
                MessageLevel::Warning,
                &format!("Pass '{}' ({id}) is already registered", pass.name()),
            );
            return Err(SceneError::DuplicatePass(id));
        }

        pass.init(&self.root);
        self.sink.log(
            MessageLevel::Information,
            &format!("Added {} pass '{}'", pass.phase(), pass.name()),
        );
        self.passes.push(pass);
        Ok(())
    }

    /// Remove a pass, calling its `destroy` hook
    pub fn remove_pass(&mut self, id: Identity) -> Option<Box<dyn ScenePass>> {
        let index = self.passes.iter().position(|pass| pass.id() == id)?;
        let mut pass = self.passes.remove(index);
        pass.destroy();
        Some(pass)
    }

    /// Installed passes in registration order
    pub fn passes(&self) -> &[Box<dyn ScenePass>] {
        &self.passes
    }

    /// Run every update pass, in registration order
    pub fn update(&mut self, frame: FrameTime) {
        self.run_phase(PassPhase::Update, frame);
    }

    /// Run every render pass, in registration order
    pub fn render(&mut self, frame: FrameTime) {
        self.run_phase(PassPhase::Render, frame);
    }

    /// Advance the clock one frame, then update and render
    pub fn tick(&mut self) -> FrameTime {
        let frame = self.clock.tick();
        self.update(frame);
        self.render(frame);
        frame
    }

    fn run_phase(&mut self, phase: PassPhase, frame: FrameTime) {
        let root = &self.root;
        for pass in self.passes.iter_mut().filter(|pass| pass.phase() == phase) {
            pass.run(root, frame);
        }
    }

    /// Create a node of kind `T` under the root
    pub fn create_node<T: Activate<Arc<Node>>>(&self) -> Result<Arc<Node>, SceneError> {
        self.create_node_under::<T>(&self.root)
    }

    /// Create a node of kind `T` under `parent`
    pub fn create_node_under<T: Activate<Arc<Node>>>(
        &self,
        parent: &Arc<Node>,
    ) -> Result<Arc<Node>, SceneError> {
        Ok(parent.create_and_attach_child::<T>(&self.nodes)?)
    }

    /// Create a component of type `T` and attach it to `node`
    pub fn create_component<T: Activate<ComponentRef>>(
        &self,
        node: &Arc<Node>,
    ) -> Result<ComponentRef, SceneError> {
        Ok(node.create_and_attach_component::<T>(&self.components)?)
    }

    /// Find a node anywhere in the scene, root included
    pub fn find_node(&self, id: Identity) -> Option<Arc<Node>> {
        if self.root.id() == id {
            return Some(Arc::clone(&self.root));
        }
        self.root.find_child_recursive(id)
    }

    /// Detach a node from whichever parent holds it
    ///
    /// The root cannot be removed.
    pub fn remove_node(&self, id: Identity) -> Option<Arc<Node>> {
        let node = self.root.find_child_recursive(id)?;
        node.parent()?.detach_child(id)
    }

    /// Current counters
    pub fn stats(&self) -> SceneStats {
        let (nodes, components) = count(&self.root);
        SceneStats {
            frames: self.clock.frame_count(),
            nodes,
            components,
            average_fps: self.clock.average_fps(),
        }
    }

    /// Send the current counters and per-pass totals to the sink
    pub fn report_statistics(&self) {
        let stats = self.stats();
        self.sink.log(
            MessageLevel::Statistics,
            &format!(
                "{} frames, {:.1} fps average, {} nodes, {} components",
                stats.frames, stats.average_fps, stats.nodes, stats.components
            ),
        );
        for pass in &self.passes {
            self.sink.log(
                MessageLevel::Statistics,
                &format!("{}: {} components processed", pass.name(), pass.processed()),
            );
        }
    }
}

fn count(node: &Node) -> (usize, usize) {
    node.children()
        .iter()
        .fold((1, node.component_count()), |(nodes, components), child| {
            let (n, c) = count(child);
            (nodes + n, components + c)
        })
}

impl Drop for Scene {
    fn drop(&mut self) {
        for pass in &mut self.passes {
            pass.destroy();
        }
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("root", &self.root.name())
            .field("passes", &self.passes.iter().map(|p| p.name()).collect::<Vec<_>>())
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
