//! Context-adjusted weight vectors.
//!
//! Each [`AdjustmentRule`] replaces one indicator's weight with
//! `base + slope * factor`, where the factor is the cell's climate harshness
//! or urbanization. Rules are applied independently against the same
//! context, then the whole vector is renormalised once. Indicators without a
//! rule keep their weight from the base vector.

use serde::Serialize;
use tracing::debug;

use cmpi_context::{ContextFactors, Factor};

use crate::error::IndexError;
use crate::indicator::Indicator;
use crate::weights::WeightVector;

/// Linear weight adjustment for one indicator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustmentRule {
    pub indicator: Indicator,
    /// Weight when the driving factor is 0.
    pub base: f64,
    /// Weight added per unit of the driving factor.
    pub slope: f64,
    pub driver: Factor,
}

impl AdjustmentRule {
    pub fn new(indicator: Indicator, base: f64, slope: f64, driver: Factor) -> Self {
        Self {
            indicator,
            base,
            slope,
            driver,
        }
    }

    /// Pre-renormalisation weight for the given context.
    pub fn raw_weight(&self, factors: &ContextFactors) -> f64 {
        self.base + self.slope * factors.get(self.driver)
    }

    /// Range of raw weights over factor values in `[0, 1]`.
    pub fn range(&self) -> (f64, f64) {
        (self.base, self.base + self.slope)
    }

    fn validate(&self) -> Result<(), IndexError> {
        let invalid = |reason: String| IndexError::InvalidRule {
            indicator: self.indicator,
            reason,
        };
        if !self.base.is_finite() || self.base < 0.0 {
            return Err(invalid(format!("base must be >= 0, got {}", self.base)));
        }
        if !self.slope.is_finite() || self.slope < 0.0 {
            return Err(invalid(format!("slope must be >= 0, got {}", self.slope)));
        }
        if self.base + self.slope > 1.0 {
            return Err(invalid(format!(
                "base + slope must not exceed 1, got {}",
                self.base + self.slope
            )));
        }
        Ok(())
    }
}

/// A validated set of adjustment rules, at most one per indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustmentRules {
    rules: Vec<AdjustmentRule>,
}

impl Default for AdjustmentRules {
    fn default() -> Self {
        Self::standard()
    }
}

impl AdjustmentRules {
    /// Validates and wraps a rule list.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidRule`] if a rule has a negative or
    /// non-finite coefficient, can exceed a weight of 1, or targets an
    /// indicator that already has a rule.
    pub fn new(rules: Vec<AdjustmentRule>) -> Result<Self, IndexError> {
        let set = Self { rules };
        set.validate()?;
        Ok(set)
    }

    /// Electricity tracks climate harshness; sanitation and drinking water
    /// track urbanization.
    pub fn standard() -> Self {
        Self {
            rules: vec![
                AdjustmentRule::new(Indicator::Electricity, 0.08, 0.12, Factor::ClimateHarshness),
                AdjustmentRule::new(Indicator::Sanitation, 0.08, 0.07, Factor::Urbanization),
                AdjustmentRule::new(Indicator::DrinkingWater, 0.08, 0.07, Factor::Urbanization),
            ],
        }
    }

    /// [`standard`](Self::standard) plus cooking fuel and housing, both
    /// tracking climate harshness.
    pub fn extended() -> Self {
        let mut rules = Self::standard().rules;
        rules.push(AdjustmentRule::new(
            Indicator::CookingFuel,
            0.05,
            0.05,
            Factor::ClimateHarshness,
        ));
        rules.push(AdjustmentRule::new(
            Indicator::Housing,
            0.08,
            0.07,
            Factor::ClimateHarshness,
        ));
        Self { rules }
    }

    /// No adjustments; adjusted weights equal the base weights.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[AdjustmentRule] {
        &self.rules
    }

    /// Rule for an indicator, if any.
    pub fn get(&self, indicator: Indicator) -> Option<&AdjustmentRule> {
        self.rules.iter().find(|r| r.indicator == indicator)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// # Errors
    ///
    /// See [`AdjustmentRules::new`].
    pub fn validate(&self) -> Result<(), IndexError> {
        let mut seen = [false; Indicator::COUNT];
        for rule in &self.rules {
            rule.validate()?;
            let slot = &mut seen[rule.indicator.index()];
            if *slot {
                return Err(IndexError::InvalidRule {
                    indicator: rule.indicator,
                    reason: "more than one rule targets this indicator".to_string(),
                });
            }
            *slot = true;
        }
        Ok(())
    }
}

/// Applies every rule independently against `base`, without renormalising.
pub fn raw_adjusted_weights(
    base: &WeightVector,
    factors: &ContextFactors,
    rules: &AdjustmentRules,
) -> [f64; Indicator::COUNT] {
    let mut raw = *base.as_array();
    for rule in rules.rules() {
        raw[rule.indicator.index()] = rule.raw_weight(factors);
    }
    raw
}

/// Adjusted weights for one context, with the pre-renormalisation values
/// kept for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedWeights {
    pub weights: WeightVector,
    pub raw_sum: f64,
}

/// Computes the renormalised adjusted weight vector for one context.
///
/// # Errors
///
/// Returns [`IndexError::InvalidRule`] if `rules` fails validation, and
/// [`IndexError::InvalidWeightVector`] if the renormalised vector breaks the
/// sum-to-one contract. The latter indicates a faulty rule set and is never
/// corrected silently.
pub fn adjusted_weights(
    base: &WeightVector,
    factors: &ContextFactors,
    rules: &AdjustmentRules,
) -> Result<AdjustedWeights, IndexError> {
    rules.validate()?;
    let raw = raw_adjusted_weights(base, factors, rules);
    let raw_sum: f64 = raw.iter().sum();
    let weights = WeightVector::renormalized(raw)?;
    debug!(
        harshness = factors.climate_harshness(),
        urbanization = factors.urbanization(),
        raw_sum,
        "adjusted weights"
    );
    Ok(AdjustedWeights { weights, raw_sum })
}
