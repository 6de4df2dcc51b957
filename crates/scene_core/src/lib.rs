//! # Scene Core
//!
//! A node/component scene tree with runtime type activation.
//!
//! ## Features
//!
//! - **Node Tree**: Nodes own child nodes and components through shared handles
//! - **Typed Search**: Component lookup on a node, its ancestors or its subtree
//! - **Activation Cache**: Create registered types from a runtime key and argument list
//! - **Keyed Factory**: Map arbitrary keys to creation strategies
//! - **Scene Passes**: Per-frame update and render walks over the active tree
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use scene_core::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = Scene::from_config(&SceneConfig::default(), Arc::new(FacadeSink))?;
//!
//!     let ship = scene.create_node::<GameObject>()?;
//!     scene.create_component::<Behaviour>(&ship)?;
//!     assert!(ship.get_component::<Transform>().is_some());
//!
//!     let frame = scene.tick();
//!     assert_eq!(frame.frame, 0);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::must_use_candidate)]

pub mod activation;
pub mod config;
pub mod ecs;
pub mod foundation;
pub mod scene;

/// Common imports for scene users
pub mod prelude {
    pub use crate::{
        activation::{
            Activate, ActivationError, Activator, Arg, ConstructorTable, Factory, FactoryError,
            TypeKey,
        },
        args,
        config::{Config, ConfigError, SceneConfig},
        ecs::{
            Behaviour, Component, ComponentActivator, ComponentCore, ComponentRef, GameObject,
            Node, NodeActivator, PlainNode, Renderable, Transform, TreeError, Updateable,
        },
        foundation::{
            math::{Mat4, Quat, Vec3},
            FacadeSink, FrameClock, FrameTime, Identity, LogSink, MemorySink, MessageLevel,
            MessageLevels,
        },
        scene::{PassPhase, Scene, SceneError, SceneRenderer, ScenePass, SceneUpdater},
    };
}
