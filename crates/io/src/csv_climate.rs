//! Climate grid cache as a long-format CSV file, one row per grid point
//! and timestamp.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use cmpi_cells::{ClimateGrid, GeoPoint, GridPoint};
use cmpi_climate::ClimateSeries;

use crate::error::IoError;
use crate::source::ClimateSource;

/// One CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateRecord {
    pub grid_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub precipitation_mm: f64,
    #[serde(default)]
    pub dewpoint_c: Option<f64>,
}

/// Rows for one grid point, in file order.
#[derive(Debug)]
struct PointRows {
    id: String,
    latitude: f64,
    longitude: f64,
    timestamps: Vec<NaiveDateTime>,
    temperature: Vec<f64>,
    precipitation: Vec<f64>,
    dewpoint: Vec<Option<f64>>,
}

impl PointRows {
    fn into_grid_point(self) -> Result<GridPoint, IoError> {
        let with_dewpoint = self.dewpoint.iter().filter(|d| d.is_some()).count();
        let dewpoint = if with_dewpoint == self.dewpoint.len() {
            Some(self.dewpoint.into_iter().flatten().collect())
        } else if with_dewpoint == 0 {
            None
        } else {
            return Err(IoError::Validation {
                count: 1,
                details: format!(
                    "grid point {}: dewpoint present on {with_dewpoint} of {} rows",
                    self.id,
                    self.dewpoint.len()
                ),
            });
        };
        let series =
            ClimateSeries::new(self.timestamps, self.temperature, self.precipitation, dewpoint)?;
        Ok(GridPoint {
            id: self.id,
            location: GeoPoint::new(self.latitude, self.longitude)?,
            series,
        })
    }
}

/// Reads a grid previously written by [`write_climate_csv`] (or any file
/// with the same columns).
///
/// Rows for a grid point need not be contiguous but must be in time order.
/// Grid points keep the order of their first row.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvClimateSource {
    path: PathBuf,
}

impl CsvClimateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ClimateSource for CsvClimateSource {
    fn name(&self) -> &str {
        "csv"
    }

    #[tracing::instrument(skip_all, fields(path = %self.path.display()))]
    fn load(&self) -> Result<ClimateGrid, IoError> {
        let path = &self.path;
        if !path.exists() {
            return Err(IoError::FileNotFound { path: path.clone() });
        }
        let mut reader = csv::ReaderBuilder::new()
            .from_path(path)
            .map_err(|e| IoError::csv(path, e))?;

        let mut points: Vec<PointRows> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut rows = 0usize;

        for (i, result) in reader.deserialize::<ClimateRecord>().enumerate() {
            let record = result.map_err(|e| IoError::csv(path, e))?;
            let line = i as u64 + 2;
            rows += 1;

            let slot = match slots.get(&record.grid_id) {
                Some(&slot) => slot,
                None => {
                    slots.insert(record.grid_id.clone(), points.len());
                    points.push(PointRows {
                        id: record.grid_id.clone(),
                        latitude: record.latitude,
                        longitude: record.longitude,
                        timestamps: Vec::new(),
                        temperature: Vec::new(),
                        precipitation: Vec::new(),
                        dewpoint: Vec::new(),
                    });
                    points.len() - 1
                }
            };
            let entry = &mut points[slot];
            if entry.latitude != record.latitude || entry.longitude != record.longitude {
                return Err(IoError::InvalidRecord {
                    path: path.clone(),
                    line,
                    reason: format!(
                        "grid point {} moved from ({}, {}) to ({}, {})",
                        record.grid_id,
                        entry.latitude,
                        entry.longitude,
                        record.latitude,
                        record.longitude
                    ),
                });
            }
            entry.timestamps.push(record.timestamp);
            entry.temperature.push(record.temperature_c);
            entry.precipitation.push(record.precipitation_mm);
            entry.dewpoint.push(record.dewpoint_c);
        }

        if points.is_empty() {
            return Err(IoError::Empty { path: path.clone() });
        }
        debug!(rows, points = points.len(), "parsed climate rows");

        let grid = ClimateGrid::new(
            points
                .into_iter()
                .map(PointRows::into_grid_point)
                .collect::<Result<_, _>>()?,
        )?;
        info!(points = grid.len(), "loaded climate grid from csv");
        Ok(grid)
    }
}

/// Writes every sample of every grid point, grid point by grid point.
///
/// # Errors
///
/// Returns [`IoError::Csv`] or [`IoError::Io`] if the file cannot be
/// written.
pub fn write_climate_csv(path: &Path, grid: &ClimateGrid) -> Result<(), IoError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| IoError::csv(path, e))?;
    let mut rows = 0usize;
    for point in grid.points() {
        let s = &point.series;
        for i in 0..s.len() {
            writer
                .serialize(ClimateRecord {
                    grid_id: point.id.clone(),
                    latitude: point.location.lat(),
                    longitude: point.location.lon(),
                    timestamp: s.timestamps()[i],
                    temperature_c: s.temperature()[i],
                    precipitation_mm: s.precipitation()[i],
                    dewpoint_c: s.dewpoint().map(|d| d[i]),
                })
                .map_err(|e| IoError::csv(path, e))?;
            rows += 1;
        }
    }
    writer.flush().map_err(|source| IoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), points = grid.len(), rows, "wrote climate csv");
    Ok(())
}
