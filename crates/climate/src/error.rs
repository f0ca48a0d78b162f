//! Error types for the cmpi-climate crate.

/// Error type for all fallible operations in the cmpi-climate crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ClimateError {
    /// Returned when a series contains no samples.
    #[error("climate series is empty")]
    EmptySeries,

    /// Returned when parallel arrays differ in length.
    #[error("length mismatch: expected {expected}, got {got} for {field}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
        /// Name of the mismatched field.
        field: String,
    },

    /// Returned when one or more value checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
