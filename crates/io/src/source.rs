//! Provider traits and the survey data model shared by every source.

use serde::{Deserialize, Serialize};

use cmpi_cells::{CellSpec, ClimateGrid, GeoPoint, UrbanizationSource};
use cmpi_context::CellDemographics;
use cmpi_index::Household;

use crate::error::IoError;

/// Supplies the gridded climate series for the study area.
pub trait ClimateSource: Send + Sync {
    /// Short label used in log output.
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Returns [`IoError`] if the data cannot be produced or read.
    fn load(&self) -> Result<ClimateGrid, IoError>;
}

/// Supplies wards and their surveyed households.
pub trait SurveySource: Send + Sync {
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Returns [`IoError`] if the data cannot be produced or read, or if a
    /// household carries a non-binary indicator value.
    fn load(&self) -> Result<SurveyData, IoError>;
}

/// One ward (census area) row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WardRecord {
    pub ward_id: String,
    #[serde(default)]
    pub ward_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// People per km².
    pub population_density: f64,
    /// 0 = rural, 1 = urban.
    pub urban_rural_index: f64,
    #[serde(default)]
    pub distance_to_hospital_km: Option<f64>,
    #[serde(default)]
    pub num_households: Option<u32>,
    #[serde(default)]
    pub population: Option<u64>,
}

impl WardRecord {
    pub fn demographics(&self) -> CellDemographics {
        let d = CellDemographics::new(self.population_density, self.urban_rural_index);
        match self.distance_to_hospital_km {
            Some(km) => d.with_distance_to_services(km),
            None => d,
        }
    }

    /// Converts the ward into a cell description with demographic
    /// urbanization.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Cell`] if the coordinates are out of range.
    pub fn to_cell_spec(&self) -> Result<CellSpec, IoError> {
        let location = GeoPoint::new(self.latitude, self.longitude)?;
        let spec = CellSpec::new(
            self.ward_id.clone(),
            location,
            UrbanizationSource::Demographics(self.demographics()),
        );
        Ok(match &self.ward_name {
            Some(name) => spec.with_name(name.clone()),
            None => spec,
        })
    }
}

/// Wards plus the households surveyed in them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurveyData {
    pub wards: Vec<WardRecord>,
    pub households: Vec<Household>,
}

impl SurveyData {
    /// Cell descriptions for every ward, in ward order.
    ///
    /// # Errors
    ///
    /// Returns the first [`WardRecord::to_cell_spec`] failure.
    pub fn cell_specs(&self) -> Result<Vec<CellSpec>, IoError> {
        self.wards.iter().map(WardRecord::to_cell_spec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ward() -> WardRecord {
        WardRecord {
            ward_id: "W001".into(),
            ward_name: Some("Ward 1".into()),
            latitude: -29.85,
            longitude: 30.9,
            population_density: 100.0,
            urban_rural_index: 0.6,
            distance_to_hospital_km: Some(4.0),
            num_households: Some(200),
            population: None,
        }
    }

    #[test]
    fn ward_converts_to_cell_spec() {
        let spec = ward().to_cell_spec().unwrap();
        assert_eq!(spec.id, "W001");
        assert_eq!(spec.name.as_deref(), Some("Ward 1"));
        assert_relative_eq!(spec.urbanization.urbanization(), 0.55, epsilon = 1e-12);
        match spec.urbanization {
            UrbanizationSource::Demographics(d) => {
                assert_eq!(d.distance_to_services_km, Some(4.0));
            }
            other => panic!("expected demographics, got {other:?}"),
        }
    }

    #[test]
    fn bad_coordinates_are_rejected() {
        let mut w = ward();
        w.latitude = -120.0;
        assert!(matches!(w.to_cell_spec(), Err(IoError::Cell(_))));
    }
}
