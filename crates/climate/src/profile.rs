//! Per-cell climate summary.

use serde::Serialize;
use tracing::debug;

use crate::config::HarshnessConfig;
use crate::daily::daily_aggregate;
use crate::degree_days::degree_days;
use crate::error::ClimateError;
use crate::harshness::harshness_index;
use crate::humidity::mean_relative_humidity;
use crate::series::ClimateSeries;

/// Scalar climate summary of one grid cell over the analysis period.
///
/// Built once per cell by [`build_profile`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateProfile {
    /// Mean of all temperature samples (°C).
    pub temp_mean: f64,
    /// Lowest temperature sample (°C).
    pub temp_min: f64,
    /// Highest temperature sample (°C).
    pub temp_max: f64,
    /// Sample standard deviation of temperature (°C).
    pub temp_sd: f64,
    /// Mean daily temperature range (°C).
    pub avg_daily_range: f64,
    /// Total precipitation over the period (mm).
    pub precip_total: f64,
    /// Mean daily precipitation (mm/day).
    pub precip_mean: f64,
    /// Heating degree days.
    pub heating_degree_days: f64,
    /// Cooling degree days.
    pub cooling_degree_days: f64,
    /// Mean relative humidity (%), when dewpoint was supplied.
    pub avg_humidity: Option<f64>,
    /// Number of calendar days covered.
    pub n_days: usize,
    /// Harshness index in `[0, 1]`.
    pub harshness: f64,
}

/// Builds a [`ClimateProfile`] from a validated series.
///
/// Degree days are computed on daily mean temperatures; the extremes,
/// temperature mean and humidity use the raw samples.
///
/// # Errors
///
/// Returns [`ClimateError::InvalidConfig`] if `config` fails validation.
pub fn build_profile(
    series: &ClimateSeries,
    config: &HarshnessConfig,
) -> Result<ClimateProfile, ClimateError> {
    config.validate()?;

    let temp = series.temperature();
    let daily = daily_aggregate(series);

    // Construction guarantees at least one finite sample.
    let temp_min = cmpi_stats::min(temp).ok_or(ClimateError::EmptySeries)?;
    let temp_max = cmpi_stats::max(temp).ok_or(ClimateError::EmptySeries)?;

    let dd = degree_days(daily.mean_temp(), config.heating_base(), config.cooling_base());
    let harshness = harshness_index(dd, temp_min, temp_max, config);

    let avg_humidity = series
        .dewpoint()
        .and_then(|dp| mean_relative_humidity(temp, dp));

    let precip_total: f64 = series.precipitation().iter().sum();

    let profile = ClimateProfile {
        temp_mean: cmpi_stats::mean(temp),
        temp_min,
        temp_max,
        temp_sd: cmpi_stats::sd(temp),
        avg_daily_range: cmpi_stats::mean(&daily.temp_range()),
        precip_total,
        precip_mean: precip_total / daily.len() as f64,
        heating_degree_days: dd.heating,
        cooling_degree_days: dd.cooling,
        avg_humidity,
        n_days: daily.len(),
        harshness,
    };

    debug!(
        n_days = profile.n_days,
        hdd = profile.heating_degree_days,
        cdd = profile.cooling_degree_days,
        harshness = profile.harshness,
        "climate profile built"
    );

    Ok(profile)
}
