use thiserror::Error;

/// Rejected configuration values. Raised only when a [`crate::SimConfig`] is
/// validated at load time; the simulation components themselves never fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} limit is inverted: min {min} > max {max}")]
    InvertedLimit { field: &'static str, min: f32, max: f32 },

    #[error("{field} rest value {rest} lies outside [{min}, {max}]")]
    RestOutOfRange {
        field: &'static str,
        rest: f32,
        min: f32,
        max: f32,
    },

    #[error("arc stability window needs at least 3 samples (got {0})")]
    WindowTooSmall(usize),

    #[error("arc stability window is capped at {max} samples (got {got})")]
    WindowTooLarge { got: usize, max: usize },

    #[error("max_multiplier must be at least 1.0 (got {0})")]
    MultiplierBelowOne(f32),

    #[error("defect dedup threshold must lie in (0, 1] (got {0})")]
    DedupThreshold(f32),
}
