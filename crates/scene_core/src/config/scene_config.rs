//! Scene configuration
//!
//! Everything the demo needs to build and drive a scene. Every section has
//! defaults, so a file only needs the values it changes:
//!
//! ```toml
//! root_name = "World"
//!
//! [frame]
//! frames = 600
//! fixed_delta = 0.016
//! ```

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Name of the root node
    pub root_name: String,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Frame loop configuration
    pub frame: FrameConfig,

    /// Which built-in passes to install
    pub passes: PassConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter (`RUST_LOG` overrides it)
    pub level: String,
}

/// Frame loop configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Number of frames to run
    pub frames: u64,

    /// Fixed seconds per frame; `None` follows the wall clock
    pub fixed_delta: Option<f64>,

    /// Frame rate used to judge statistics
    pub target_fps: f64,
}

/// Built-in pass selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassConfig {
    /// Install the updater pass
    pub updater: bool,

    /// Install the renderer pass
    pub renderer: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            root_name: "Root".to_string(),
            logging: LoggingConfig::default(),
            frame: FrameConfig::default(),
            passes: PassConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            fixed_delta: Some(1.0 / 60.0),
            target_fps: 60.0,
        }
    }
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            updater: true,
            renderer: true,
        }
    }
}

impl Config for SceneConfig {}

impl SceneConfig {
    /// Set the root node name
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Set the default log filter
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Set the number of frames to run
    pub fn with_frames(mut self, frames: u64) -> Self {
        self.frame.frames = frames;
        self
    }

    /// Use a fixed frame delta, or the wall clock with `None`
    pub fn with_fixed_delta(mut self, delta: Option<f64>) -> Self {
        self.frame.fixed_delta = delta;
        self
    }

    /// Choose which built-in passes to install
    pub fn with_passes(mut self, updater: bool, renderer: bool) -> Self {
        self.passes = PassConfig { updater, renderer };
        self
    }

    /// Check values that deserialize fine but cannot drive a scene
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_name.trim().is_empty() {
            return Err(ConfigError::Invalid("root_name must not be empty".to_string()));
        }
        if let Some(delta) = self.frame.fixed_delta {
            if !(delta.is_finite() && delta > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "frame.fixed_delta must be positive, got {delta}"
                )));
            }
        }
        if !(self.frame.target_fps.is_finite() && self.frame.target_fps > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "frame.target_fps must be positive, got {}",
                self.frame.target_fps
            )));
        }
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}
