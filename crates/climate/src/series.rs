//! Raw climate time series for a single grid cell.

use chrono::NaiveDateTime;

use crate::error::ClimateError;
use crate::validate;

/// Temperature, precipitation and optional dewpoint samples for one grid
/// cell, ordered in time.
///
/// Samples may be hourly, daily or any other sub-daily cadence; profile
/// building aggregates them to calendar days first. Values are in degrees
/// Celsius and millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateSeries {
    timestamps: Vec<NaiveDateTime>,
    temperature: Vec<f64>,
    precipitation: Vec<f64>,
    dewpoint: Option<Vec<f64>>,
}

impl ClimateSeries {
    /// Creates a new series after validating its contents.
    ///
    /// # Errors
    ///
    /// Returns [`ClimateError::EmptySeries`] if there are no samples,
    /// [`ClimateError::LengthMismatch`] if the arrays differ in length, and
    /// [`ClimateError::Validation`] if any value is non-finite, any
    /// precipitation is negative, or the timestamps go backwards.
    pub fn new(
        timestamps: Vec<NaiveDateTime>,
        temperature: Vec<f64>,
        precipitation: Vec<f64>,
        dewpoint: Option<Vec<f64>>,
    ) -> Result<Self, ClimateError> {
        let n = timestamps.len();
        if n == 0 {
            return Err(ClimateError::EmptySeries);
        }
        let mut lengths = vec![
            ("temperature", temperature.len()),
            ("precipitation", precipitation.len()),
        ];
        if let Some(dp) = &dewpoint {
            lengths.push(("dewpoint", dp.len()));
        }
        for (field, len) in lengths {
            if len != n {
                return Err(ClimateError::LengthMismatch {
                    expected: n,
                    got: len,
                    field: field.to_string(),
                });
            }
        }

        let mut c = validate::validate_finite(&temperature, "temperature");
        c.extend(validate::validate_finite(&precipitation, "precipitation"));
        c.extend(validate::validate_precip_non_negative(&precipitation));
        if let Some(dp) = &dewpoint {
            c.extend(validate::validate_finite(dp, "dewpoint"));
        }
        c.extend(validate::validate_chronological(&timestamps));
        c.finish()?;

        Ok(Self {
            timestamps,
            temperature,
            precipitation,
            dewpoint,
        })
    }

    /// Returns the sample timestamps.
    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    /// Returns the temperature samples (degrees Celsius).
    pub fn temperature(&self) -> &[f64] {
        &self.temperature
    }

    /// Returns the precipitation samples (mm).
    pub fn precipitation(&self) -> &[f64] {
        &self.precipitation
    }

    /// Returns the dewpoint samples (degrees Celsius), if present.
    pub fn dewpoint(&self) -> Option<&[f64]> {
        self.dewpoint.as_deref()
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// Always `false`: construction rejects empty series.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn hourly(n: usize) -> Vec<NaiveDateTime> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n).map(|h| start + Duration::hours(h as i64)).collect()
    }

    #[test]
    fn accepts_well_formed_series() {
        let s = ClimateSeries::new(hourly(3), vec![20.0; 3], vec![0.0; 3], Some(vec![15.0; 3]))
            .unwrap();
        assert_eq!(s.len(), 3);
        assert!(s.dewpoint().is_some());
    }

    #[test]
    fn rejects_empty() {
        let err = ClimateSeries::new(vec![], vec![], vec![], None).unwrap_err();
        assert!(matches!(err, ClimateError::EmptySeries));
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = ClimateSeries::new(hourly(3), vec![20.0; 3], vec![0.0; 2], None).unwrap_err();
        assert!(
            matches!(err, ClimateError::LengthMismatch { ref field, expected: 3, got: 2 } if field == "precipitation"),
            "got {err:?}"
        );
    }

    #[test]
    fn rejects_dewpoint_length_mismatch() {
        let err = ClimateSeries::new(hourly(2), vec![20.0; 2], vec![0.0; 2], Some(vec![1.0]))
            .unwrap_err();
        assert!(matches!(err, ClimateError::LengthMismatch { .. }));
    }

    #[test]
    fn rejects_bad_values() {
        let err = ClimateSeries::new(
            hourly(3),
            vec![20.0, f64::NAN, 21.0],
            vec![0.0, -1.0, 0.0],
            None,
        )
        .unwrap_err();
        match err {
            ClimateError::Validation { count, .. } => assert_eq!(count, 2),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unordered_timestamps() {
        let mut ts = hourly(3);
        ts.swap(0, 2);
        let err = ClimateSeries::new(ts, vec![20.0; 3], vec![0.0; 3], None).unwrap_err();
        assert!(matches!(err, ClimateError::Validation { .. }));
    }
}
