//! Indicator weight vectors.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::IndexError;
use crate::indicator::{Dimension, Indicator};

/// Allowed deviation of a weight vector's sum from 1.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

const SIXTH: f64 = 1.0 / 6.0;
const EIGHTEENTH: f64 = 1.0 / 18.0;

/// One weight per indicator, each in `[0, 1]`, summing to 1 within
/// [`WEIGHT_TOLERANCE`].
///
/// Every constructor validates, so a `WeightVector` in hand always satisfies
/// the contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightVector {
    weights: [f64; Indicator::COUNT],
}

impl WeightVector {
    /// Builds a weight vector from weights in canonical indicator order.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidWeightVector`] if any weight is outside
    /// `[0, 1]` or the sum deviates from 1 by more than [`WEIGHT_TOLERANCE`].
    pub fn new(weights: [f64; Indicator::COUNT]) -> Result<Self, IndexError> {
        let w = Self { weights };
        w.validate()?;
        Ok(w)
    }

    /// Canonical OPHI weights: dimensions weighted equally, each split evenly
    /// among its indicators.
    pub fn ophi() -> Self {
        Self {
            weights: [
                SIXTH, SIXTH, SIXTH, SIXTH, EIGHTEENTH, EIGHTEENTH, EIGHTEENTH, EIGHTEENTH,
                EIGHTEENTH, EIGHTEENTH,
            ],
        }
    }

    /// Equal weight of 0.1 on every indicator.
    pub fn equal() -> Self {
        Self {
            weights: [0.1; Indicator::COUNT],
        }
    }

    /// Builds a weight vector from a map covering every indicator.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::MissingWeight`] if an indicator is absent, or
    /// [`IndexError::InvalidWeightVector`] if validation fails.
    pub fn from_map(map: &BTreeMap<Indicator, f64>) -> Result<Self, IndexError> {
        let mut weights = [0.0; Indicator::COUNT];
        for ind in Indicator::ALL {
            weights[ind.index()] = *map
                .get(&ind)
                .ok_or(IndexError::MissingWeight { indicator: ind })?;
        }
        Self::new(weights)
    }

    /// Divides raw weights by their sum and validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidWeightVector`] if the raw sum is not a
    /// positive finite number or the normalised vector fails validation.
    pub fn renormalized(raw: [f64; Indicator::COUNT]) -> Result<Self, IndexError> {
        let sum: f64 = raw.iter().sum();
        if !sum.is_finite() || sum <= 0.0 {
            return Err(IndexError::InvalidWeightVector {
                sum,
                detail: "raw weights must have a positive finite sum".to_string(),
            });
        }
        Self::new(raw.map(|w| w / sum))
    }

    /// Checks the range and sum-to-one contract.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::InvalidWeightVector`] describing the first
    /// violation found.
    pub fn validate(&self) -> Result<(), IndexError> {
        let sum = self.sum();
        for ind in Indicator::ALL {
            let w = self.weights[ind.index()];
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                return Err(IndexError::InvalidWeightVector {
                    sum,
                    detail: format!("weight for {ind} must be in [0, 1], got {w}"),
                });
            }
        }
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(IndexError::InvalidWeightVector {
                sum,
                detail: format!("weights must sum to 1 within {WEIGHT_TOLERANCE}"),
            });
        }
        Ok(())
    }

    pub fn get(&self, indicator: Indicator) -> f64 {
        self.weights[indicator.index()]
    }

    /// Weights in canonical indicator order.
    pub fn as_array(&self) -> &[f64; Indicator::COUNT] {
        &self.weights
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Total weight carried by one dimension.
    pub fn dimension_weight(&self, dimension: Dimension) -> f64 {
        dimension.indicators().map(|i| self.get(i)).sum()
    }

    /// `(indicator, weight)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Indicator, f64)> + '_ {
        Indicator::ALL.into_iter().map(move |i| (i, self.get(i)))
    }
}

impl Serialize for WeightVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Indicator::COUNT))?;
        for (ind, w) in self.iter() {
            map.serialize_entry(ind.name(), &w)?;
        }
        map.end()
    }
}
