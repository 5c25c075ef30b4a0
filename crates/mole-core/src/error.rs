use thiserror::Error;

/// Failures at the edges of the core: parsing user-facing names and
/// validating tuning values. The state machines themselves never fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("unknown game mode '{0}' (expected 'classic' or 'regular')")]
    UnknownMode(String),
    #[error("{field} must be finite and positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },
    #[error("cm range is empty: min {min} > max {max}")]
    EmptyCmRange { min: f64, max: f64 },
}

pub type CoreResult<T> = Result<T, CoreError>;
