//! Crate-level error types.

use std::fmt;

use crate::population::Tier;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LodError>;

/// Errors produced by the lodviz crate.
#[derive(Debug)]
pub enum LodError {
    /// Append past a store's fixed capacity. Indicates the declared
    /// population size disagrees with the actual one.
    CapacityExceeded {
        /// Tier that owns the full store.
        tier: Tier,
        /// Fixed capacity of that store.
        capacity: usize,
    },
    /// Access to an inert or nonexistent record index.
    IndexOutOfRange {
        /// Tier that owns the store.
        tier: Tier,
        /// Requested index.
        index: usize,
        /// Number of active records at the time of access.
        active_count: usize,
    },
    /// Tier thresholds that are not finite, negative, or out of order.
    InvalidThresholds {
        /// Configured near threshold.
        near: f32,
        /// Configured mid threshold.
        mid: f32,
    },
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Failure reported by a rendering collaborator.
    Render(String),
}

impl fmt::Display for LodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { tier, capacity } => {
                write!(f, "{tier} store is full (capacity {capacity})")
            }
            Self::IndexOutOfRange {
                tier,
                index,
                active_count,
            } => write!(
                f,
                "{tier} index {index} out of range (active count \
                 {active_count})"
            ),
            Self::InvalidThresholds { near, mid } => write!(
                f,
                "invalid tier thresholds: near {near} must be finite, \
                 non-negative and not above mid {mid}"
            ),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Render(msg) => write!(f, "render error: {msg}"),
        }
    }
}

impl std::error::Error for LodError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LodError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
