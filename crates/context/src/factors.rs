use std::fmt;

use cmpi_climate::ClimateProfile;
use serde::Serialize;
use tracing::warn;

/// A context scalar that can drive a weight adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    ClimateHarshness,
    Urbanization,
}

impl Factor {
    /// Snake-case name used in logs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Factor::ClimateHarshness => "climate_harshness",
            Factor::Urbanization => "urbanization",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An input that fell outside `[0, 1]` and was clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClampedInput {
    pub factor: Factor,
    pub original: f64,
    pub clamped: f64,
}

/// Climate harshness and urbanization for one cell, both in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextFactors {
    climate_harshness: f64,
    urbanization: f64,
    clamped: Vec<ClampedInput>,
}

impl ContextFactors {
    /// Builds context factors, clamping each value into `[0, 1]`.
    ///
    /// Never fails. A value outside the range (NaN maps to 0) is logged at
    /// warn level and recorded in [`clamped_inputs`](Self::clamped_inputs).
    pub fn new(climate_harshness: f64, urbanization: f64) -> Self {
        let mut clamped = Vec::new();
        let climate_harshness =
            clamp_recorded(Factor::ClimateHarshness, climate_harshness, &mut clamped);
        let urbanization = clamp_recorded(Factor::Urbanization, urbanization, &mut clamped);
        Self {
            climate_harshness,
            urbanization,
            clamped,
        }
    }

    /// Takes harshness from a climate profile.
    pub fn from_profile(profile: &ClimateProfile, urbanization: f64) -> Self {
        Self::new(profile.harshness, urbanization)
    }

    pub fn climate_harshness(&self) -> f64 {
        self.climate_harshness
    }

    pub fn urbanization(&self) -> f64 {
        self.urbanization
    }

    /// Value of the given factor.
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::ClimateHarshness => self.climate_harshness,
            Factor::Urbanization => self.urbanization,
        }
    }

    /// Inputs that were clamped during construction.
    pub fn clamped_inputs(&self) -> &[ClampedInput] {
        &self.clamped
    }

    /// Returns `true` if any input was clamped.
    pub fn was_clamped(&self) -> bool {
        !self.clamped.is_empty()
    }
}

fn clamp_recorded(factor: Factor, value: f64, log: &mut Vec<ClampedInput>) -> f64 {
    let clamped = cmpi_stats::clamp_unit(value);
    if value.is_nan() || clamped != value {
        warn!(
            factor = factor.name(),
            original = value,
            clamped,
            "context input out of range, clamped to [0, 1]"
        );
        log.push(ClampedInput {
            factor,
            original: value,
            clamped,
        });
    }
    clamped
}
