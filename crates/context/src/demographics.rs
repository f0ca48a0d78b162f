use serde::{Deserialize, Serialize};

/// Density at which the density term saturates (people/km^2).
const DENSITY_SATURATION: f64 = 10_000.0;

/// Ward-level demographic attributes used to derive urbanization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellDemographics {
    /// People per km^2.
    pub population_density: f64,
    /// 0 = rural, 1 = urban.
    pub urban_rural_index: f64,
    /// Distance to the nearest health or education service (km).
    #[serde(default)]
    pub distance_to_services_km: Option<f64>,
}

impl CellDemographics {
    pub fn new(population_density: f64, urban_rural_index: f64) -> Self {
        Self {
            population_density,
            urban_rural_index,
            distance_to_services_km: None,
        }
    }

    pub fn with_distance_to_services(mut self, km: f64) -> Self {
        self.distance_to_services_km = Some(km);
        self
    }

    /// Urbanization level in `[0, 1]`.
    ///
    /// Equal blend of log-scaled density (saturating at 10 000 people/km^2)
    /// and the urban/rural index. Non-finite inputs contribute zero.
    pub fn urbanization(&self) -> f64 {
        let density = if self.population_density.is_finite() {
            self.population_density.max(1.0)
        } else {
            1.0
        };
        let density_term = cmpi_stats::clamp_unit(density.log10() / DENSITY_SATURATION.log10());
        let urban_term = cmpi_stats::clamp_unit(self.urban_rural_index);
        cmpi_stats::clamp_unit(0.5 * density_term + 0.5 * urban_term)
    }
}
