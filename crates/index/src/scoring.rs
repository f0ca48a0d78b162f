//! Alkire-Foster scoring and aggregation.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::error::IndexError;
use crate::household::{Deprivations, Household};
use crate::indicator::Indicator;
use crate::weights::WeightVector;

/// Conventional poverty cutoff on the weighted deprivation score.
pub const POVERTY_CUTOFF: f64 = 1.0 / 3.0;

/// Slack allowed when comparing a score against the cutoff. Sums of
/// fractional weights such as six 1/18 terms land a few ulps off the
/// exact value.
const CUTOFF_TOLERANCE: f64 = 1e-9;

/// Scoring configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MpiConfig {
    cutoff: f64,
}

impl Default for MpiConfig {
    fn default() -> Self {
        Self {
            cutoff: POVERTY_CUTOFF,
        }
    }
}

impl MpiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the poverty cutoff.
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Poverty flag for a score: `score >= cutoff`.
    pub fn is_poor(&self, score: f64) -> bool {
        score + CUTOFF_TOLERANCE >= self.cutoff
    }

    /// # Errors
    ///
    /// Returns [`IndexError::InvalidConfig`] if the cutoff is not in `(0, 1]`.
    pub fn validate(&self) -> Result<(), IndexError> {
        if !self.cutoff.is_finite() || self.cutoff <= 0.0 || self.cutoff > 1.0 {
            return Err(IndexError::InvalidConfig {
                reason: format!("cutoff must be in (0, 1], got {}", self.cutoff),
            });
        }
        Ok(())
    }
}

/// Weighted deprivation score in `[0, 1]`.
pub fn deprivation_score(deprivations: &Deprivations, weights: &WeightVector) -> f64 {
    let score: f64 = weights
        .iter()
        .filter(|&(ind, _)| deprivations.is_deprived(ind))
        .map(|(_, w)| w)
        .sum();
    score.clamp(0.0, 1.0)
}

/// Score of one household under one weight vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdScore {
    pub household_id: String,
    pub cell_id: String,
    pub score: f64,
    pub is_poor: bool,
    /// Censored score: the score if poor, otherwise 0.
    pub intensity: f64,
    #[serde(skip)]
    pub deprivations: Deprivations,
}

impl HouseholdScore {
    pub fn new(household: &Household, weights: &WeightVector, config: &MpiConfig) -> Self {
        let score = deprivation_score(household.deprivations(), weights);
        let is_poor = config.is_poor(score);
        Self {
            household_id: household.id().to_string(),
            cell_id: household.cell_id().to_string(),
            score,
            is_poor,
            intensity: if is_poor { score } else { 0.0 },
            deprivations: *household.deprivations(),
        }
    }
}

/// Aggregate poverty measures over a set of households.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MpiSummary {
    /// `headcount_ratio * intensity`.
    pub mpi: f64,
    /// H: share of households that are poor.
    pub headcount_ratio: f64,
    /// A: mean score among the poor.
    pub intensity: f64,
    pub num_poor: usize,
    pub total: usize,
    /// Mean score over all households.
    pub mean_score: f64,
    /// Share of households both poor and deprived in each indicator.
    pub censored_headcounts: BTreeMap<Indicator, f64>,
}

impl MpiSummary {
    /// Aggregates household scores. Empty input yields all zeros.
    pub fn from_scores<'a>(scores: impl IntoIterator<Item = &'a HouseholdScore>) -> Self {
        let mut total = 0usize;
        let mut num_poor = 0usize;
        let mut score_sum = 0.0;
        let mut poor_score_sum = 0.0;
        let mut censored = [0usize; Indicator::COUNT];

        for s in scores {
            total += 1;
            score_sum += s.score;
            if s.is_poor {
                num_poor += 1;
                poor_score_sum += s.score;
                for ind in s.deprivations.deprived() {
                    censored[ind.index()] += 1;
                }
            }
        }

        let ratio = |n: usize, d: usize| if d == 0 { 0.0 } else { n as f64 / d as f64 };
        let headcount_ratio = ratio(num_poor, total);
        let intensity = if num_poor == 0 {
            0.0
        } else {
            poor_score_sum / num_poor as f64
        };
        let mean_score = if total == 0 {
            0.0
        } else {
            score_sum / total as f64
        };
        let censored_headcounts = Indicator::ALL
            .into_iter()
            .map(|ind| (ind, ratio(censored[ind.index()], total)))
            .collect();

        Self {
            mpi: headcount_ratio * intensity,
            headcount_ratio,
            intensity,
            num_poor,
            total,
            mean_score,
            censored_headcounts,
        }
    }
}

/// Per-household scores plus their aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MpiResult {
    pub households: Vec<HouseholdScore>,
    pub summary: MpiSummary,
}

/// Scores households under a fixed weight vector and aggregates them.
///
/// The weight vector is supplied by the caller; pass
/// [`WeightVector::ophi`] for the canonical standard MPI. The adjusted
/// calculator reuses this function with per-cell weights.
///
/// # Errors
///
/// Returns [`IndexError::InvalidWeightVector`] if `weights` fails validation
/// or [`IndexError::InvalidConfig`] if `config` does.
pub fn compute_standard_mpi(
    households: &[Household],
    weights: &WeightVector,
    config: &MpiConfig,
) -> Result<MpiResult, IndexError> {
    weights.validate()?;
    config.validate()?;

    let scores: Vec<HouseholdScore> = households
        .iter()
        .map(|h| HouseholdScore::new(h, weights, config))
        .collect();
    let summary = MpiSummary::from_scores(&scores);

    debug!(
        total = summary.total,
        poor = summary.num_poor,
        mpi = summary.mpi,
        "scored households"
    );

    Ok(MpiResult {
        households: scores,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn deprived_in(n: usize) -> Deprivations {
        Deprivations::from_indicators(&Indicator::ALL[..n])
    }

    #[test]
    fn three_of_ten_is_not_poor_four_is() {
        let w = WeightVector::equal();
        let cfg = MpiConfig::default();

        let three = deprivation_score(&deprived_in(3), &w);
        assert_relative_eq!(three, 0.3, epsilon = 1e-12);
        assert!(!cfg.is_poor(three));

        let four = deprivation_score(&deprived_in(4), &w);
        assert_relative_eq!(four, 0.4, epsilon = 1e-12);
        assert!(cfg.is_poor(four));
    }

    #[test]
    fn living_standards_alone_reach_the_cutoff() {
        // Six 1/18 weights accumulate to a hair above 1/3.
        let d = Deprivations::from_indicators(&Indicator::ALL[4..]);
        let score = deprivation_score(&d, &WeightVector::ophi());
        assert!(MpiConfig::default().is_poor(score));
    }

    #[test]
    fn score_is_bounded() {
        let all = deprived_in(Indicator::COUNT);
        let score = deprivation_score(&all, &WeightVector::ophi());
        assert!((0.0..=1.0).contains(&score));
        assert_relative_eq!(score, 1.0, epsilon = 1e-12);
        assert_eq!(deprivation_score(&Deprivations::none(), &WeightVector::ophi()), 0.0);
    }

    #[test]
    fn empty_input_yields_zeros() {
        let r = compute_standard_mpi(&[], &WeightVector::ophi(), &MpiConfig::default()).unwrap();
        assert!(r.households.is_empty());
        assert_eq!(r.summary.mpi, 0.0);
        assert_eq!(r.summary.headcount_ratio, 0.0);
        assert_eq!(r.summary.intensity, 0.0);
        assert_eq!(r.summary.total, 0);
    }

    #[test]
    fn no_poor_households_yields_zero_mpi() {
        let hh: Vec<Household> = (0..5)
            .map(|i| Household::new(format!("h{i}"), "c", deprived_in(1)))
            .collect();
        let r = compute_standard_mpi(&hh, &WeightVector::equal(), &MpiConfig::default()).unwrap();
        assert_eq!(r.summary.num_poor, 0);
        assert_eq!(r.summary.mpi, 0.0);
        assert_relative_eq!(r.summary.mean_score, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn censored_headcounts_count_only_the_poor() {
        let hh = vec![
            Household::new("poor", "c", deprived_in(5)),
            Household::new("not_poor", "c", Deprivations::from_indicators(&[Indicator::Nutrition])),
        ];
        let r = compute_standard_mpi(&hh, &WeightVector::equal(), &MpiConfig::default()).unwrap();
        let c = &r.summary.censored_headcounts;
        assert_eq!(c[&Indicator::Nutrition], 0.5);
        assert_eq!(c[&Indicator::CookingFuel], 0.5);
        assert_eq!(c[&Indicator::Assets], 0.0);
    }

    #[test]
    fn invalid_cutoff_is_rejected() {
        for cutoff in [0.0, -0.1, 1.5, f64::NAN] {
            let cfg = MpiConfig::default().with_cutoff(cutoff);
            assert!(matches!(
                cfg.validate(),
                Err(IndexError::InvalidConfig { .. })
            ));
        }
    }
}
