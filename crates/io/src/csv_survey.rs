//! Wards and households as CSV files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use cmpi_index::{Deprivations, Household, Indicator};

use crate::error::IoError;
use crate::source::{SurveyData, SurveySource, WardRecord};

/// One household row. Deprivation columns hold 0 or 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdRecord {
    pub household_id: String,
    pub cell_id: String,
    pub household_size: u32,
    #[serde(default)]
    pub num_children: Option<u32>,
    pub deprived_nutrition: f64,
    pub deprived_child_mortality: f64,
    pub deprived_years_of_schooling: f64,
    pub deprived_school_attendance: f64,
    pub deprived_cooking_fuel: f64,
    pub deprived_sanitation: f64,
    pub deprived_drinking_water: f64,
    pub deprived_electricity: f64,
    pub deprived_housing: f64,
    pub deprived_assets: f64,
}

impl HouseholdRecord {
    /// Indicator values in [`Indicator::ALL`] order.
    fn values(&self) -> [f64; Indicator::COUNT] {
        [
            self.deprived_nutrition,
            self.deprived_child_mortality,
            self.deprived_years_of_schooling,
            self.deprived_school_attendance,
            self.deprived_cooking_fuel,
            self.deprived_sanitation,
            self.deprived_drinking_water,
            self.deprived_electricity,
            self.deprived_housing,
            self.deprived_assets,
        ]
    }

    /// # Errors
    ///
    /// Returns [`IoError::Index`] wrapping `MalformedHousehold` if any
    /// deprivation value is not exactly 0 or 1.
    pub fn into_household(self) -> Result<Household, IoError> {
        let deprivations = Deprivations::from_values(&self.household_id, self.values())?;
        let household = Household::new(self.household_id, self.cell_id, deprivations)
            .with_size(self.household_size);
        Ok(match self.num_children {
            Some(n) => household.with_children(n),
            None => household,
        })
    }
}

impl From<&Household> for HouseholdRecord {
    fn from(h: &Household) -> Self {
        let v = h.deprivations().values();
        Self {
            household_id: h.id().to_string(),
            cell_id: h.cell_id().to_string(),
            household_size: h.size(),
            num_children: h.children(),
            deprived_nutrition: v[Indicator::Nutrition.index()],
            deprived_child_mortality: v[Indicator::ChildMortality.index()],
            deprived_years_of_schooling: v[Indicator::YearsOfSchooling.index()],
            deprived_school_attendance: v[Indicator::SchoolAttendance.index()],
            deprived_cooking_fuel: v[Indicator::CookingFuel.index()],
            deprived_sanitation: v[Indicator::Sanitation.index()],
            deprived_drinking_water: v[Indicator::DrinkingWater.index()],
            deprived_electricity: v[Indicator::Electricity.index()],
            deprived_housing: v[Indicator::Housing.index()],
            deprived_assets: v[Indicator::Assets.index()],
        }
    }
}

/// Reads wards and households from two CSV files.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvSurveySource {
    wards: PathBuf,
    households: PathBuf,
}

impl CsvSurveySource {
    pub fn new(wards: impl Into<PathBuf>, households: impl Into<PathBuf>) -> Self {
        Self {
            wards: wards.into(),
            households: households.into(),
        }
    }

    pub fn wards_path(&self) -> &Path {
        &self.wards
    }

    pub fn households_path(&self) -> &Path {
        &self.households
    }
}

impl SurveySource for CsvSurveySource {
    fn name(&self) -> &str {
        "csv"
    }

    #[tracing::instrument(skip_all, fields(wards = %self.wards.display()))]
    fn load(&self) -> Result<SurveyData, IoError> {
        let wards: Vec<WardRecord> = read_records(&self.wards)?;
        let mut ids = HashSet::with_capacity(wards.len());
        for (i, w) in wards.iter().enumerate() {
            if !ids.insert(w.ward_id.as_str()) {
                return Err(IoError::InvalidRecord {
                    path: self.wards.clone(),
                    line: i as u64 + 2,
                    reason: format!("duplicate ward id {}", w.ward_id),
                });
            }
        }

        let households = read_records::<HouseholdRecord>(&self.households)?
            .into_iter()
            .map(HouseholdRecord::into_household)
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            wards = wards.len(),
            households = households.len(),
            "loaded survey from csv"
        );
        Ok(SurveyData { wards, households })
    }
}

fn read_records<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>, IoError> {
    if !path.exists() {
        return Err(IoError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = csv::ReaderBuilder::new()
        .from_path(path)
        .map_err(|e| IoError::csv(path, e))?;
    let records = reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(|e| IoError::csv(path, e))?;
    if records.is_empty() {
        return Err(IoError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok(records)
}

fn write_records<T: Serialize>(
    path: &Path,
    records: impl IntoIterator<Item = T>,
) -> Result<usize, IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    let mut rows = 0;
    for record in records {
        writer.serialize(record).map_err(|e| IoError::csv(path, e))?;
        rows += 1;
    }
    writer.flush().map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(rows)
}

/// # Errors
///
/// Returns [`IoError::Csv`] or [`IoError::Io`] if the file cannot be
/// written.
pub fn write_wards_csv(path: &Path, wards: &[WardRecord]) -> Result<(), IoError> {
    let rows = write_records(path, wards)?;
    info!(path = %path.display(), rows, "wrote wards csv");
    Ok(())
}

/// # Errors
///
/// Returns [`IoError::Csv`] or [`IoError::Io`] if the file cannot be
/// written.
pub fn write_households_csv(path: &Path, households: &[Household]) -> Result<(), IoError> {
    let rows = write_records(path, households.iter().map(HouseholdRecord::from))?;
    info!(path = %path.display(), rows, "wrote households csv");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> HouseholdRecord {
        HouseholdRecord {
            household_id: "W001_HH000".into(),
            cell_id: "W001".into(),
            household_size: 4,
            num_children: Some(1),
            deprived_nutrition: 1.0,
            deprived_child_mortality: 0.0,
            deprived_years_of_schooling: 0.0,
            deprived_school_attendance: 0.0,
            deprived_cooking_fuel: 0.0,
            deprived_sanitation: 1.0,
            deprived_drinking_water: 0.0,
            deprived_electricity: 0.0,
            deprived_housing: 1.0,
            deprived_assets: 0.0,
        }
    }

    #[test]
    fn record_maps_columns_to_indicators() {
        let h = record().into_household().unwrap();
        let d = h.deprivations();
        assert!(d.is_deprived(Indicator::Nutrition));
        assert!(d.is_deprived(Indicator::Sanitation));
        assert!(d.is_deprived(Indicator::Housing));
        assert_eq!(d.count(), 3);
        assert_eq!(h.size(), 4);
        assert_eq!(h.children(), Some(1));
        assert_eq!(HouseholdRecord::from(&h), record());
    }

    #[test]
    fn fractional_value_is_malformed() {
        let mut r = record();
        r.deprived_assets = 0.5;
        let err = r.into_household().unwrap_err();
        assert!(matches!(
            err,
            IoError::Index(cmpi_index::IndexError::MalformedHousehold {
                indicator: Indicator::Assets,
                ..
            })
        ));
    }
}
