//! Seeded synthetic census: wards west of the coastline and households
//! sampled from ward-level deprivation rates.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Distribution, Normal, Poisson};
use tracing::{info, warn};

use cmpi_index::{Deprivations, Household, Indicator};

use crate::error::IoError;
use crate::source::{SurveyData, SurveySource, WardRecord};

/// Candidate draws before giving up on reaching the requested ward count.
const MAX_ATTEMPTS: usize = 200;
const LAT_RANGE: (f64, f64) = (-30.2, -29.6);
const LON_RANGE: (f64, f64) = (30.5, 31.1);
/// Width of the coastal strip (degrees of longitude).
const COAST_STRIP: f64 = 0.15;
const CBD: (f64, f64) = (-29.85, 31.03);
const MEAN_HOUSEHOLD_SIZE: f64 = 3.5;
const CHILD_PROBABILITY: f64 = 0.3;

/// Per-indicator deprivation rate as `scale * base + N(0, sd)`.
const RATE_PROFILE: [(Indicator, f64, f64); Indicator::COUNT] = [
    (Indicator::Nutrition, 0.2, 0.04),
    (Indicator::ChildMortality, 0.25, 0.05),
    (Indicator::YearsOfSchooling, 0.3, 0.05),
    (Indicator::SchoolAttendance, 0.15, 0.03),
    (Indicator::CookingFuel, 0.2, 0.04),
    (Indicator::Sanitation, 0.4, 0.08),
    (Indicator::DrinkingWater, 0.35, 0.06),
    (Indicator::Electricity, 0.3, 0.05),
    (Indicator::Housing, 0.25, 0.05),
    (Indicator::Assets, 0.35, 0.07),
];

type Rates = [f64; Indicator::COUNT];

/// Longitude of the coastline at a given latitude.
fn coast_boundary(lat: f64) -> f64 {
    30.7 + 0.5 * (lat + 29.9)
}

/// Generates wards and households for the Durban study area.
///
/// Wards are placed at random inside the land area. Density falls and
/// deprivation rises with distance from the coastline and the CBD. Each
/// ward then gets a fixed number of households whose indicators are drawn
/// independently from the ward's rates. School attendance is only drawn
/// for households with children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticSurveySource {
    num_wards: usize,
    households_per_ward: usize,
    seed: u64,
}

impl Default for SyntheticSurveySource {
    fn default() -> Self {
        Self {
            num_wards: 50,
            households_per_ward: 20,
            seed: 42,
        }
    }
}

impl SyntheticSurveySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target ward count; fewer may be produced if candidates keep landing
    /// offshore.
    pub fn with_num_wards(mut self, n: usize) -> Self {
        self.num_wards = n;
        self
    }

    pub fn with_households_per_ward(mut self, n: usize) -> Self {
        self.households_per_ward = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn num_wards(&self) -> usize {
        self.num_wards
    }

    pub fn households_per_ward(&self) -> usize {
        self.households_per_ward
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if either count is zero.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut errors = Vec::new();
        if self.num_wards == 0 {
            errors.push("num_wards must be > 0".to_string());
        }
        if self.households_per_ward == 0 {
            errors.push("households_per_ward must be > 0".to_string());
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: errors.len(),
                details: errors.join("; "),
            })
        }
    }

    /// Wards paired with their per-indicator deprivation rates.
    fn generate_wards(&self, rng: &mut StdRng) -> Result<Vec<(WardRecord, Rates)>, IoError> {
        let household_noise = normal(0.0, 100.0)?;
        let base_noise = normal(0.0, 0.15)?;
        let hospital_noise = normal(0.0, 2.0)?;

        let mut wards = Vec::with_capacity(self.num_wards);
        let mut attempts = 0;
        while wards.len() < self.num_wards && attempts < MAX_ATTEMPTS {
            attempts += 1;
            let lat = rng.random_range(LAT_RANGE.0..LAT_RANGE.1);
            let lon = rng.random_range(LON_RANGE.0..LON_RANGE.1);

            let boundary = coast_boundary(lat);
            if lon > boundary + COAST_STRIP {
                continue;
            }
            // Offset past the boundary line, scaled to [0, 1].
            let coast_distance = (lon - boundary).max(0.0) / COAST_STRIP;
            let cbd_distance = ((lat - CBD.0).powi(2) + (lon - CBD.1).powi(2)).sqrt();

            let density = (5000.0 * (1.0 - coast_distance) * (1.0 - 2.0 * cbd_distance))
                .clamp(100.0, 10_000.0);
            let num_households =
                ((density * 2.0 + household_noise.sample(rng)) as i64).max(50) as u32;

            let base = (coast_distance * 0.6 + cbd_distance * 0.2 + base_noise.sample(rng))
                .clamp(0.0, 1.0);
            let mut rates = [0.0; Indicator::COUNT];
            for (indicator, scale, sd) in RATE_PROFILE {
                let rate = base * scale + normal(0.0, sd)?.sample(rng);
                rates[indicator.index()] = rate.clamp(0.0, 1.0);
            }

            let n = wards.len() + 1;
            let ward = WardRecord {
                ward_id: format!("W{n:03}"),
                ward_name: Some(format!("Ward {n}")),
                latitude: lat,
                longitude: lon,
                population_density: density,
                urban_rural_index: 1.0 - coast_distance * 0.5,
                distance_to_hospital_km: Some(coast_distance * 15.0 + hospital_noise.sample(rng)),
                num_households: Some(num_households),
                population: Some((num_households as f64 * MEAN_HOUSEHOLD_SIZE) as u64),
            };
            wards.push((ward, rates));
        }

        if wards.len() < self.num_wards {
            warn!(
                requested = self.num_wards,
                generated = wards.len(),
                attempts,
                "ran out of attempts placing wards"
            );
        }
        Ok(wards)
    }

    fn generate_households(
        &self,
        ward: &WardRecord,
        rates: &Rates,
        rng: &mut StdRng,
    ) -> Result<Vec<Household>, IoError> {
        let size_dist = Poisson::new(MEAN_HOUSEHOLD_SIZE).map_err(distribution_error)?;
        let mut out = Vec::with_capacity(self.households_per_ward);
        for k in 0..self.households_per_ward {
            let size = (size_dist.sample(rng) as u32).max(1);
            let children = if size > 1 {
                Binomial::new(u64::from(size - 1), CHILD_PROBABILITY)
                    .map_err(distribution_error)?
                    .sample(rng) as u32
            } else {
                0
            };

            let mut deprivations = Deprivations::none();
            for indicator in Indicator::ALL {
                if indicator == Indicator::SchoolAttendance && children == 0 {
                    continue;
                }
                let draw: f64 = rng.random();
                deprivations.set(indicator, draw < rates[indicator.index()]);
            }

            out.push(
                Household::new(format!("{}_HH{k:03}", ward.ward_id), &ward.ward_id, deprivations)
                    .with_size(size)
                    .with_children(children),
            );
        }
        Ok(out)
    }
}

impl SurveySource for SyntheticSurveySource {
    fn name(&self) -> &str {
        "synthetic"
    }

    #[tracing::instrument(skip_all, fields(seed = self.seed))]
    fn load(&self) -> Result<SurveyData, IoError> {
        self.validate()?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let generated = self.generate_wards(&mut rng)?;
        let mut data = SurveyData::default();
        for (ward, rates) in generated {
            data.households
                .extend(self.generate_households(&ward, &rates, &mut rng)?);
            data.wards.push(ward);
        }

        info!(
            wards = data.wards.len(),
            households = data.households.len(),
            "generated synthetic survey"
        );
        Ok(data)
    }
}

fn normal(mean: f64, sd: f64) -> Result<Normal<f64>, IoError> {
    Normal::new(mean, sd).map_err(distribution_error)
}

fn distribution_error(e: impl std::fmt::Display) -> IoError {
    IoError::Validation {
        count: 1,
        details: format!("invalid sampling distribution: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generates_requested_wards_and_households() {
        let data = SyntheticSurveySource::default()
            .with_num_wards(10)
            .with_households_per_ward(5)
            .load()
            .unwrap();
        assert_eq!(data.wards.len(), 10);
        assert_eq!(data.households.len(), 50);
        assert_eq!(data.wards[0].ward_id, "W001");
        assert_eq!(data.households[0].id(), "W001_HH000");
        assert_eq!(data.households[4].id(), "W001_HH004");
        assert_eq!(data.households[5].cell_id(), "W002");
    }

    #[test]
    fn wards_lie_on_land() {
        let data = SyntheticSurveySource::default().load().unwrap();
        for w in &data.wards {
            assert!(w.longitude <= coast_boundary(w.latitude) + COAST_STRIP);
            assert!((100.0..=10_000.0).contains(&w.population_density));
            assert!(w.num_households.unwrap() >= 50);
            assert!((0.5..=1.0).contains(&w.urban_rural_index));
        }
    }

    #[test]
    fn attendance_requires_children() {
        let data = SyntheticSurveySource::default()
            .with_households_per_ward(30)
            .load()
            .unwrap();
        for h in &data.households {
            assert!(h.size() >= 1);
            let children = h.children().unwrap();
            assert!(children < h.size());
            if children == 0 {
                assert!(!h.deprivations().is_deprived(Indicator::SchoolAttendance));
            }
        }
    }

    #[test]
    fn seeded_and_unique() {
        let a = SyntheticSurveySource::default().with_seed(3).load().unwrap();
        let b = SyntheticSurveySource::default().with_seed(3).load().unwrap();
        assert_eq!(a, b);
        let ids: HashSet<_> = a.households.iter().map(|h| h.id()).collect();
        assert_eq!(ids.len(), a.households.len());
    }

    #[test]
    fn zero_counts_are_rejected() {
        let err = SyntheticSurveySource::default()
            .with_num_wards(0)
            .with_households_per_ward(0)
            .load()
            .unwrap_err();
        assert!(matches!(err, IoError::Validation { count: 2, .. }));
    }
}
