//! Error types for the cmpi-index crate.

use crate::indicator::Indicator;

/// Error type for all fallible operations in the cmpi-index crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IndexError {
    /// Returned when a weight vector breaks the sum-to-one or range contract.
    #[error("invalid weight vector (sum = {sum}): {detail}")]
    InvalidWeightVector {
        /// Sum of the offending weights.
        sum: f64,
        /// What was wrong.
        detail: String,
    },

    /// Returned when a deprivation indicator is not exactly 0 or 1.
    #[error("malformed household {household}: {indicator} = {value}, expected 0 or 1")]
    MalformedHousehold {
        /// Household identifier.
        household: String,
        /// Offending indicator.
        indicator: Indicator,
        /// Value supplied.
        value: f64,
    },

    /// Returned when a weight map omits an indicator.
    #[error("missing weight for indicator {indicator}")]
    MissingWeight {
        /// Indicator with no weight.
        indicator: Indicator,
    },

    /// Returned when an indicator name is not recognised.
    #[error("unknown indicator: {name}")]
    UnknownIndicator {
        /// The unrecognised name.
        name: String,
    },

    /// Returned when an adjustment rule is invalid.
    #[error("invalid adjustment rule for {indicator}: {reason}")]
    InvalidRule {
        /// Indicator targeted by the rule.
        indicator: Indicator,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
