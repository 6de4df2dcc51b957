//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Process-unique identities for nodes and components
//! - Math aliases
//! - Frame timing
//! - Logging utilities and the injectable log sink

pub mod identity;
pub mod logging;
pub mod math;
pub mod time;

pub use identity::Identity;
pub use logging::{FacadeSink, LogSink, MemorySink, MessageLevel, MessageLevels};
pub use time::{FrameClock, FrameTime};
