//! Accumulated validation utilities.
//!
//! Provides [`ValidationCollector`] for gathering multiple validation errors
//! into a single [`ClimateError::Validation`], plus helpers that check the
//! invariants of a raw climate series.

use chrono::NaiveDateTime;

use crate::error::ClimateError;

/// Maximum number of individual messages kept in the error details.
const MAX_DETAILS: usize = 10;

/// Accumulates validation errors and converts them into a single
/// [`ClimateError::Validation`].
pub(crate) struct ValidationCollector {
    errors: Vec<String>,
}

impl ValidationCollector {
    /// Create an empty collector.
    pub(crate) fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record one validation error.
    pub(crate) fn push(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Move every error from `other` into this collector.
    pub(crate) fn extend(&mut self, other: ValidationCollector) {
        self.errors.extend(other.errors);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.errors.len()
    }

    /// Consume the collector and return `Ok(())` if no errors were recorded.
    ///
    /// The `details` string joins the first messages with `"; "`; the count
    /// always reflects every recorded error.
    pub(crate) fn finish(self) -> Result<(), ClimateError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let count = self.errors.len();
        let mut details = self
            .errors
            .into_iter()
            .take(MAX_DETAILS)
            .collect::<Vec<_>>()
            .join("; ");
        if count > MAX_DETAILS {
            details.push_str(&format!("; ... and {} more", count - MAX_DETAILS));
        }
        Err(ClimateError::Validation { count, details })
    }
}

/// Check that every value of `field` is finite.
pub(crate) fn validate_finite(values: &[f64], field: &str) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            c.push(format!("non-finite {field} at index {i}: {v}"));
        }
    }
    c
}

/// Check that every precipitation value is non-negative.
pub(crate) fn validate_precip_non_negative(precip: &[f64]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for (i, &val) in precip.iter().enumerate() {
        if val < 0.0 {
            c.push(format!("negative precipitation at index {i}: {val}"));
        }
    }
    c
}

/// Check that timestamps never go backwards.
pub(crate) fn validate_chronological(timestamps: &[NaiveDateTime]) -> ValidationCollector {
    let mut c = ValidationCollector::new();
    for (i, pair) in timestamps.windows(2).enumerate() {
        if pair[1] < pair[0] {
            c.push(format!(
                "timestamp at index {} ({}) precedes index {i} ({})",
                i + 1,
                pair[1],
                pair[0]
            ));
        }
    }
    c
}
