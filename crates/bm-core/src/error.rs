//! Shared error type.
//!
//! Sub-crates define their own error enums (`GraphError`, `RasterError`) and
//! wrap `BmError` where a core failure bubbles up.

use thiserror::Error;

/// The base error type for `bm-core` and a common vocabulary for sub-crates.
#[derive(Debug, Error)]
pub enum BmError {
    #[error("invalid coordinate ({lat}, {lon})")]
    InvalidCoordinate { lat: f64, lon: f64 },
}

/// Shorthand result type for `bm-core`.
pub type BmResult<T> = Result<T, BmError>;
