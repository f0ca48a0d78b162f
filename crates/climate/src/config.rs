//! Configuration for degree-day and harshness computation.

use crate::error::ClimateError;

/// Reference values for degree days and the harshness index.
///
/// The comfort band is `[heating_base, cooling_base]` (18-24 °C by default).
/// Degree days are normalised against `degree_day_max` and comfort-band
/// excursions of the annual extremes against `extreme_span`; the two terms
/// are blended with `extremes_weight`.
#[derive(Debug, Clone, PartialEq)]
pub struct HarshnessConfig {
    heating_base: f64,
    cooling_base: f64,
    degree_day_max: f64,
    extreme_span: f64,
    extremes_weight: f64,
}

impl Default for HarshnessConfig {
    fn default() -> Self {
        Self {
            heating_base: 18.0,
            cooling_base: 24.0,
            degree_day_max: 3000.0,
            extreme_span: 50.0,
            extremes_weight: 0.5,
        }
    }
}

impl HarshnessConfig {
    /// Set the heating base temperature (°C), the lower edge of the comfort band.
    pub fn with_heating_base(mut self, base: f64) -> Self {
        self.heating_base = base;
        self
    }

    /// Set the cooling base temperature (°C), the upper edge of the comfort band.
    pub fn with_cooling_base(mut self, base: f64) -> Self {
        self.cooling_base = base;
        self
    }

    /// Set the degree-day total that maps to a harshness of 1.
    pub fn with_degree_day_max(mut self, max: f64) -> Self {
        self.degree_day_max = max;
        self
    }

    /// Set the combined extreme excursion (°C) that maps to a harshness of 1.
    pub fn with_extreme_span(mut self, span: f64) -> Self {
        self.extreme_span = span;
        self
    }

    /// Set the blend weight of the extremes term. `0.0` uses degree days only.
    pub fn with_extremes_weight(mut self, weight: f64) -> Self {
        self.extremes_weight = weight;
        self
    }

    /// Returns the heating base temperature.
    pub fn heating_base(&self) -> f64 {
        self.heating_base
    }

    /// Returns the cooling base temperature.
    pub fn cooling_base(&self) -> f64 {
        self.cooling_base
    }

    /// Returns the degree-day normalisation reference.
    pub fn degree_day_max(&self) -> f64 {
        self.degree_day_max
    }

    /// Returns the extremes normalisation reference.
    pub fn extreme_span(&self) -> f64 {
        self.extreme_span
    }

    /// Returns the blend weight of the extremes term.
    pub fn extremes_weight(&self) -> f64 {
        self.extremes_weight
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::InvalidConfig`] if any value is non-finite,
    /// the heating base exceeds the cooling base, a reference is not
    /// positive, or the blend weight is outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ClimateError> {
        for (name, v) in [
            ("heating_base", self.heating_base),
            ("cooling_base", self.cooling_base),
            ("degree_day_max", self.degree_day_max),
            ("extreme_span", self.extreme_span),
            ("extremes_weight", self.extremes_weight),
        ] {
            if !v.is_finite() {
                return Err(ClimateError::InvalidConfig {
                    reason: format!("{name} is not finite: {v}"),
                });
            }
        }
        if self.heating_base > self.cooling_base {
            return Err(ClimateError::InvalidConfig {
                reason: format!(
                    "heating_base ({}) must not exceed cooling_base ({})",
                    self.heating_base, self.cooling_base
                ),
            });
        }
        if self.degree_day_max <= 0.0 {
            return Err(ClimateError::InvalidConfig {
                reason: format!("degree_day_max must be > 0, got {}", self.degree_day_max),
            });
        }
        if self.extreme_span <= 0.0 {
            return Err(ClimateError::InvalidConfig {
                reason: format!("extreme_span must be > 0, got {}", self.extreme_span),
            });
        }
        if !(0.0..=1.0).contains(&self.extremes_weight) {
            return Err(ClimateError::InvalidConfig {
                reason: format!(
                    "extremes_weight must be in [0, 1], got {}",
                    self.extremes_weight
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = HarshnessConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.heating_base(), 18.0);
        assert_eq!(cfg.cooling_base(), 24.0);
        assert_eq!(cfg.degree_day_max(), 3000.0);
    }

    #[test]
    fn rejects_inverted_band() {
        let cfg = HarshnessConfig::default()
            .with_heating_base(25.0)
            .with_cooling_base(20.0);
        assert!(matches!(
            cfg.validate(),
            Err(ClimateError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_reference() {
        let cfg = HarshnessConfig::default().with_degree_day_max(0.0);
        assert!(cfg.validate().is_err());
        let cfg = HarshnessConfig::default().with_extreme_span(-1.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_weight_out_of_range() {
        let cfg = HarshnessConfig::default().with_extremes_weight(1.5);
        assert!(cfg.validate().is_err());
        let cfg = HarshnessConfig::default().with_extremes_weight(f64::NAN);
        assert!(cfg.validate().is_err());
    }
}
