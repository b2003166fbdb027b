//! Core error type.
//!
//! Raised by config validation and canvas checks; `SimError` wraps it.

use thiserror::Error;

use crate::Point;

/// Errors raised while validating core inputs.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("point {0} lies outside the canvas")]
    OutOfBounds(Point),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `rsb-core`.
pub type CoreResult<T> = Result<T, CoreError>;
