//! Logging utilities and the injectable log sink
//!
//! Library code logs through the `log` facade. Application-level reporting
//! (frame statistics, pass warnings) goes through a [`LogSink`] that the entry
//! point constructs and hands to the scene, so there is no process-wide
//! logger object to initialise lazily.

use bitflags::bitflags;
use parking_lot::Mutex;

/// Initialize the logging system with a default filter
///
/// `RUST_LOG` still takes precedence when set. Returns `false` when a global
/// logger was already installed (common in tests).
pub fn init_with_level(level: &str) -> bool {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init()
        .is_ok()
}

/// Severity of a sink message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageLevel {
    /// General information
    Information,
    /// Runtime statistics such as frame counters
    Statistics,
    /// Recoverable problem
    Warning,
    /// Failure
    Error,
}

bitflags! {
    /// Set of message levels, used to clear a subset of recorded messages
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MessageLevels: u8 {
        /// [`MessageLevel::Information`]
        const INFORMATION = 1 << 0;
        /// [`MessageLevel::Statistics`]
        const STATISTICS = 1 << 1;
        /// [`MessageLevel::Warning`]
        const WARNING = 1 << 2;
        /// [`MessageLevel::Error`]
        const ERROR = 1 << 3;
    }
}

impl From<MessageLevel> for MessageLevels {
    fn from(level: MessageLevel) -> Self {
        match level {
            MessageLevel::Information => Self::INFORMATION,
            MessageLevel::Statistics => Self::STATISTICS,
            MessageLevel::Warning => Self::WARNING,
            MessageLevel::Error => Self::ERROR,
        }
    }
}

impl From<MessageLevel> for log::Level {
    fn from(level: MessageLevel) -> Self {
        match level {
            MessageLevel::Information => Self::Info,
            MessageLevel::Statistics => Self::Debug,
            MessageLevel::Warning => Self::Warn,
            MessageLevel::Error => Self::Error,
        }
    }
}

/// Destination for application-level messages
pub trait LogSink: Send + Sync {
    /// Record a message
    fn log(&self, level: MessageLevel, message: &str);

    /// Drop previously recorded messages whose level is in `levels`
    fn clear(&self, _levels: MessageLevels) {}
}

/// Sink that forwards every message to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn log(&self, level: MessageLevel, message: &str) {
        log::log!(target: "scene", log::Level::from(level), "{message}");
    }
}

/// Sink that keeps messages in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(MessageLevel, String)>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every recorded message in arrival order
    pub fn entries(&self) -> Vec<(MessageLevel, String)> {
        self.entries.lock().clone()
    }

    /// Number of recorded messages at the given level
    pub fn count(&self, level: MessageLevel) -> usize {
        self.entries.lock().iter().filter(|(l, _)| *l == level).count()
    }
}

impl LogSink for MemorySink {
    fn log(&self, level: MessageLevel, message: &str) {
        self.entries.lock().push((level, message.to_string()));
    }

    fn clear(&self, levels: MessageLevels) {
        self.entries
            .lock()
            .retain(|(level, _)| !levels.contains(MessageLevels::from(*level)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.log(MessageLevel::Information, "first");
        sink.log(MessageLevel::Warning, "second");

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (MessageLevel::Information, "first".to_string()));
        assert_eq!(entries[1].0, MessageLevel::Warning);
    }

    #[test]
    fn test_memory_sink_clear_by_level() {
        let sink = MemorySink::new();
        sink.log(MessageLevel::Information, "info");
        sink.log(MessageLevel::Statistics, "stats");
        sink.log(MessageLevel::Error, "boom");

        sink.clear(MessageLevels::STATISTICS | MessageLevels::ERROR);

        assert_eq!(sink.entries().len(), 1);
        assert_eq!(sink.count(MessageLevel::Information), 1);

        sink.clear(MessageLevels::all());
        assert!(sink.entries().is_empty());
    }
}
