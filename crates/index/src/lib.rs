//! # cmpi-index
//!
//! Alkire-Foster Multidimensional Poverty Index over ten binary deprivation
//! indicators.
//!
//! - [`compute_standard_mpi`] scores households under a caller-supplied
//!   [`WeightVector`] (usually [`WeightVector::ophi`]) and aggregates
//!   headcount ratio, intensity and MPI.
//! - [`adjusted_weights`] derives a per-context weight vector from
//!   [`AdjustmentRules`] and a cell's `ContextFactors`, renormalised to sum
//!   to one.
//!
//! All functions are pure: identical inputs give identical outputs.

mod adjust;
mod error;
mod household;
mod indicator;
mod scoring;
mod weights;

pub use adjust::{
    AdjustedWeights, AdjustmentRule, AdjustmentRules, adjusted_weights, raw_adjusted_weights,
};
pub use error::IndexError;
pub use household::{Deprivations, Household};
pub use indicator::{Dimension, Indicator};
pub use scoring::{
    HouseholdScore, MpiConfig, MpiResult, MpiSummary, POVERTY_CUTOFF, compute_standard_mpi,
    deprivation_score,
};
pub use weights::{WEIGHT_TOLERANCE, WeightVector};
