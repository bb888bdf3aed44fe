//! Error types surfaced by the engine.

use thiserror::Error;

/// Errors produced inside the simulation core.
///
/// Only [`EngineError::InvalidMode`] ever reaches a caller directly (from
/// `set_mode`). Every other variant is caught at the tick boundary and
/// replaced by the fallback output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid mode \"{0}\", expected \"online\" or \"offline\"")]
    InvalidMode(String),

    #[error("invalid weather sample: {0}")]
    InvalidWeather(String),

    #[error("non-finite value for {0}")]
    NonFiniteValue(&'static str),
}

/// Returns `value` unchanged, or `NonFiniteValue(field)` if it is NaN or infinite.
pub(crate) fn finite(field: &'static str, value: f32) -> Result<f32, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFiniteValue(field))
    }
}
