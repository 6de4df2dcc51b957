//! Scene wrapper and per-frame passes
//!
//! A [`Scene`] owns a root node and an ordered list of [`ScenePass`]es. The
//! built-in passes walk the active part of the tree and dispatch to the
//! [`Updateable`](crate::ecs::Updateable) and
//! [`Renderable`](crate::ecs::Renderable) capabilities of components.

pub mod passes;
pub mod scene_graph;


use thiserror::Error;

use crate::config::ConfigError;
use crate::ecs::TreeError;
use crate::foundation::Identity;

pub use passes::{PassPhase, SceneRenderer, ScenePass, SceneUpdater};
pub use scene_graph::{Scene, SceneStats};

/// Scene-level errors
#[derive(Error, Debug)]
pub enum SceneError {
    /// Tree mutation or activation failed
    #[error(transparent)]
    Tree(#[from] TreeError),

    /// Configuration could not be used
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A pass with the same identity is already installed
    #[error("Pass {0} is already registered")]
    DuplicatePass(Identity),
}
