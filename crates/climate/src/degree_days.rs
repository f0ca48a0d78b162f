//! Heating and cooling degree days.

use serde::Serialize;

/// Heating and cooling degree-day totals over a period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DegreeDays {
    /// Sum of `max(0, heating_base - T)` over the days.
    pub heating: f64,
    /// Sum of `max(0, T - cooling_base)` over the days.
    pub cooling: f64,
}

impl DegreeDays {
    /// Combined heating and cooling demand.
    pub fn total(&self) -> f64 {
        self.heating + self.cooling
    }
}

/// Computes degree days from daily mean temperatures.
pub fn degree_days(daily_mean: &[f64], heating_base: f64, cooling_base: f64) -> DegreeDays {
    let heating = daily_mean
        .iter()
        .map(|&t| (heating_base - t).max(0.0))
        .sum();
    let cooling = daily_mean
        .iter()
        .map(|&t| (t - cooling_base).max(0.0))
        .sum();
    DegreeDays { heating, cooling }
}
