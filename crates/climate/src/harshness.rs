//! Climate harshness index.
//!
//! Maps degree days and the excursion of annual temperature extremes beyond
//! the comfort band onto `[0, 1]`:
//!
//! ```text
//! dd      = (HDD + CDD) / degree_day_max
//! extreme = (max(0, heating_base - Tmin) + max(0, Tmax - cooling_base)) / extreme_span
//! h       = clamp((1 - w) * dd + w * extreme, 0, 1)
//! ```
//!
//! Non-decreasing in HDD, CDD and both excursions, so a harsher climate never
//! scores lower.

use crate::config::HarshnessConfig;
use crate::degree_days::DegreeDays;

/// Excursion (°C) of the annual extremes beyond the comfort band.
pub fn comfort_deviation(temp_min: f64, temp_max: f64, config: &HarshnessConfig) -> f64 {
    (config.heating_base() - temp_min).max(0.0) + (temp_max - config.cooling_base()).max(0.0)
}

/// Harshness index in `[0, 1]`.
pub fn harshness_index(
    degree_days: DegreeDays,
    temp_min: f64,
    temp_max: f64,
    config: &HarshnessConfig,
) -> f64 {
    let dd_term = degree_days.total() / config.degree_day_max();
    let extreme_term = comfort_deviation(temp_min, temp_max, config) / config.extreme_span();
    let w = config.extremes_weight();
    cmpi_stats::clamp_unit((1.0 - w) * dd_term + w * extreme_term)
}
