//! Seeded synthetic climate for a coastal subtropical study area.

use std::f64::consts::PI;

use chrono::{Duration, NaiveDate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};
use tracing::info;

use cmpi_cells::{BoundingBox, ClimateGrid, GridPoint};
use cmpi_climate::ClimateSeries;

use crate::error::IoError;
use crate::source::ClimateSource;

const DAYS: i64 = 365;
/// Annual mean temperature at the western edge (°C).
const BASE_TEMP: f64 = 20.0;
/// Seasonal temperature amplitude (°C).
const SEASONAL_AMPLITUDE: f64 = 8.0;
/// Warming per degree of longitude east of the western edge (°C).
const EAST_WARMING: f64 = 12.0;
const TEMP_NOISE_SD: f64 = 2.0;
const BASE_PRECIP: f64 = 3.0;
const PRECIP_AMPLITUDE: f64 = 4.0;
/// Dewpoint depression at the western edge and its growth eastwards (°C).
const DEWPOINT_DEPRESSION: f64 = 3.0;
const DEWPOINT_DEPRESSION_EAST: f64 = 4.0;

/// Generates one year of daily noon samples per grid point.
///
/// Temperature follows a seasonal sinusoid peaking in the southern summer,
/// warmer with distance from the western edge of the box, plus Gaussian
/// noise. Precipitation follows the same season and grows with the same
/// distance. The generator is fully determined by its seed.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticClimateSource {
    bounds: BoundingBox,
    resolution: f64,
    year: i32,
    seed: u64,
}

impl Default for SyntheticClimateSource {
    fn default() -> Self {
        Self {
            bounds: BoundingBox::durban(),
            resolution: 0.25,
            year: 2023,
            seed: 42,
        }
    }
}

impl SyntheticClimateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(mut self, bounds: BoundingBox) -> Self {
        self.bounds = bounds;
        self
    }

    /// Grid spacing in degrees.
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// # Errors
    ///
    /// Returns [`IoError::Validation`] listing every unusable setting, or
    /// [`IoError::Cell`] if the bounding box is malformed.
    pub fn validate(&self) -> Result<(), IoError> {
        BoundingBox::new(
            self.bounds.south,
            self.bounds.north,
            self.bounds.west,
            self.bounds.east,
        )?;
        let mut errors = Vec::new();
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            errors.push(format!("resolution must be > 0, got {}", self.resolution));
        }
        if NaiveDate::from_ymd_opt(self.year, 1, 1).is_none() {
            errors.push(format!("year {} is not representable", self.year));
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
}

impl ClimateSource for SyntheticClimateSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    #[tracing::instrument(skip_all, fields(seed = self.seed, year = self.year))]
    fn load(&self) -> Result<ClimateGrid, IoError> {
        self.validate()?;
        let start = NaiveDate::from_ymd_opt(self.year, 1, 1)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .ok_or_else(|| IoError::Validation {
                count: 1,
                details: format!("year {} is not representable", self.year),
            })?;
        let timestamps: Vec<_> = (0..DAYS).map(|d| start + Duration::days(d)).collect();
        let season: Vec<f64> = (0..DAYS)
            .map(|d| (2.0 * PI * d as f64 / DAYS as f64 - PI / 2.0).sin())
            .collect();

        let noise = Normal::new(0.0, TEMP_NOISE_SD).map_err(|e| IoError::Validation {
            count: 1,
            details: e.to_string(),
        })?;
        let mut rng = StdRng::seed_from_u64(self.seed);

        let locations = self.bounds.grid_points(self.resolution)?;
        let mut points = Vec::with_capacity(locations.len());
        for (k, location) in locations.into_iter().enumerate() {
            let east_offset = location.lon() - self.bounds.west;

            let temperature: Vec<f64> = season
                .iter()
                .map(|s| {
                    BASE_TEMP
                        + SEASONAL_AMPLITUDE * s
                        + EAST_WARMING * east_offset
                        + noise.sample(&mut rng)
                })
                .collect();
            let precipitation: Vec<f64> = season
                .iter()
                .map(|s| (BASE_PRECIP + PRECIP_AMPLITUDE * s).max(0.0) * (1.0 + east_offset))
                .collect();
            let depression = DEWPOINT_DEPRESSION + DEWPOINT_DEPRESSION_EAST * east_offset;
            let dewpoint = temperature.iter().map(|t| t - depression).collect();

            let series =
                ClimateSeries::new(timestamps.clone(), temperature, precipitation, Some(dewpoint))?;
            points.push(GridPoint {
                id: format!("G{k:03}"),
                location,
                series,
            });
        }

        let grid = ClimateGrid::new(points)?;
        info!(points = grid.len(), days = DAYS, "generated synthetic climate grid");
        Ok(grid)
    }
}
