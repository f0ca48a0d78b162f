//! # cmpi-climate
//!
//! Turns a raw per-cell climate time series (temperature, precipitation,
//! optional dewpoint) into a [`ClimateProfile`]: summary statistics, heating
//! and cooling degree days, and a harshness index bounded to `[0, 1]`.
//!
//! ## Pipeline
//!
//! 1. [`ClimateSeries::new`] validates the samples handed over by a provider.
//! 2. [`daily_aggregate`] collapses sub-daily samples into calendar days.
//! 3. [`degree_days`] sums excursions of daily means outside the comfort band.
//! 4. [`harshness_index`] normalises degree days and extreme excursions.
//!
//! [`build_profile`] runs all steps.

mod config;
mod daily;
mod degree_days;
mod error;
mod harshness;
mod humidity;
mod profile;
mod series;
mod validate;

pub use config::HarshnessConfig;
pub use daily::{DailyClimate, daily_aggregate};
pub use degree_days::{DegreeDays, degree_days};
pub use error::ClimateError;
pub use harshness::{comfort_deviation, harshness_index};
pub use humidity::{mean_relative_humidity, relative_humidity};
pub use profile::{ClimateProfile, build_profile};
pub use series::ClimateSeries;
