//! Error types for glimmer_core.
//!
//! The engine is a pure computation with no I/O, so every error here is a
//! caller contract violation rather than a transient failure.

use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Mutation was requested while every trait is locked.
    #[error("Configuration error: mutation requested but no trait is mutable")]
    NoMutableTrait,

    /// A parameter lies outside its documented range.
    #[error("Invalid argument: {name} = {value} (expected {expected})")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    /// Agents cannot be placed on a grid with no cells.
    #[error("Grid has no cells; call set_size first")]
    EmptyGrid,
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Creates a new invalid argument error.
    #[must_use]
    pub fn invalid(name: &'static str, value: impl Into<f64>, expected: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            value: value.into(),
            expected,
        }
    }
}

/// Checks that `value` is finite and inside `[lo, hi]`.
pub(crate) fn ensure_in_range(
    name: &'static str,
    value: f64,
    lo: f64,
    hi: f64,
    expected: &'static str,
) -> Result<()> {
    if value.is_finite() && (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(EngineError::invalid(name, value, expected))
    }
}
