//! Process-unique identity for nodes and components

use std::fmt;
use uuid::Uuid;

/// 128-bit identity assigned once at construction
///
/// Only used as a map key and equality witness; it has no `Ord`
/// implementation since identities carry no ordering information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(Uuid);

impl Identity {
    /// Generate a fresh random identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Raw 128-bit value
    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
