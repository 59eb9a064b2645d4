//! Fatal error types for cleancut-timeline.
//!
//! Only misuse that cannot be corrected is an error. Bad detections, removals
//! past the end of the timeline and collapsed records are reported as
//! [`Diagnostic`](crate::report::Diagnostic)s instead.

use thiserror::Error;

/// Timeline editing error variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration or timeline parameter error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Malformed configuration or detection JSON
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration errors (tolerances, padding, timeline duration).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Merge-gap tolerance is negative or not finite
    #[error("invalid gap tolerance: {0}s (must be finite and non-negative)")]
    InvalidGapTolerance(f64),

    /// Detection padding is negative or not finite
    #[error("invalid padding: {0}s (must be finite and non-negative)")]
    InvalidPadding(f64),

    /// Minimum clipped record duration is not positive
    #[error("invalid minimum record duration: {0}s (must be finite and positive)")]
    InvalidMinRecordDuration(f64),

    /// Timeline duration is negative or not finite
    #[error("invalid timeline duration: {0}s (must be finite and non-negative)")]
    InvalidDuration(f64),
}

/// Result type alias for cleancut-timeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Check that `secs` is a usable non-negative length.
pub(crate) fn non_negative(secs: f64) -> bool {
    secs.is_finite() && secs >= 0.0
}
