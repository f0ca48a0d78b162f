//! # cmpi-io
//!
//! Data providers for the climate-adjusted MPI pipeline.
//!
//! Climate arrives through a [`ClimateSource`] and survey data through a
//! [`SurveySource`]. Each trait has a seeded synthetic implementation and a
//! CSV-file implementation; the caller picks one, and downstream crates
//! only see the resulting [`ClimateGrid`](cmpi_cells::ClimateGrid) and
//! [`SurveyData`].
//!
//! The `write_*` functions export data in the formats the CSV sources read,
//! so a synthetic run can be cached and reloaded.

mod csv_climate;
mod csv_survey;
mod error;
mod source;
mod synthetic_climate;
mod synthetic_survey;

pub use csv_climate::{ClimateRecord, CsvClimateSource, write_climate_csv};
pub use csv_survey::{CsvSurveySource, HouseholdRecord, write_households_csv, write_wards_csv};
pub use error::IoError;
pub use source::{ClimateSource, SurveyData, SurveySource, WardRecord};
pub use synthetic_climate::SyntheticClimateSource;
pub use synthetic_survey::SyntheticSurveySource;
