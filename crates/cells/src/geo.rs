//! Geographic coordinates and bounding boxes.

use serde::{Deserialize, Serialize};

use crate::error::CellError;

/// A validated WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// # Errors
    ///
    /// Returns [`CellError::InvalidCoordinate`] if latitude is outside
    /// `[-90, 90]` or longitude outside `[-180, 180]`.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CellError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CellError::InvalidCoordinate {
                field: "latitude",
                value: lat,
                expected: "[-90, 90]",
            });
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err(CellError::InvalidCoordinate {
                field: "longitude",
                value: lon,
                expected: "[-180, 180]",
            });
        }
        Ok(Self { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    /// Squared distance in degree space. Only meaningful for ranking nearby
    /// points.
    pub fn squared_distance(&self, other: &GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlon = self.lon - other.lon;
        dlat * dlat + dlon * dlon
    }
}

/// Latitude/longitude rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

impl BoundingBox {
    /// # Errors
    ///
    /// Returns [`CellError::InvalidCoordinate`] for out-of-range edges and
    /// [`CellError::InvalidBoundingBox`] if south is not below north or west
    /// is not west of east.
    pub fn new(south: f64, north: f64, west: f64, east: f64) -> Result<Self, CellError> {
        GeoPoint::new(south, west)?;
        GeoPoint::new(north, east)?;
        if south >= north {
            return Err(CellError::InvalidBoundingBox {
                reason: format!("south ({south}) must be below north ({north})"),
            });
        }
        if west >= east {
            return Err(CellError::InvalidBoundingBox {
                reason: format!("west ({west}) must be west of east ({east})"),
            });
        }
        Ok(Self {
            south,
            north,
            west,
            east,
        })
    }

    /// eThekwini Municipality (Durban).
    pub fn durban() -> Self {
        Self {
            south: -30.3,
            north: -29.5,
            west: 30.4,
            east: 31.2,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: &GeoPoint) -> bool {
        (self.south..=self.north).contains(&p.lat())
            && (self.west..=self.east).contains(&p.lon())
    }

    /// Regular grid starting at the south-west corner, stepping by
    /// `resolution` degrees and excluding the north and east edges.
    /// Points are ordered row by row from south to north.
    ///
    /// # Errors
    ///
    /// Returns [`CellError::InvalidBoundingBox`] if `resolution` is not
    /// positive and finite.
    pub fn grid_points(&self, resolution: f64) -> Result<Vec<GeoPoint>, CellError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(CellError::InvalidBoundingBox {
                reason: format!("grid resolution must be > 0, got {resolution}"),
            });
        }
        let n_lat = steps(self.south, self.north, resolution);
        let n_lon = steps(self.west, self.east, resolution);
        let mut points = Vec::with_capacity(n_lat * n_lon);
        for i in 0..n_lat {
            for j in 0..n_lon {
                let lat = self.south + i as f64 * resolution;
                let lon = self.west + j as f64 * resolution;
                points.push(GeoPoint::new(lat, lon)?);
            }
        }
        Ok(points)
    }
}

/// Number of points in `[start, end)` at the given step.
fn steps(start: f64, end: f64, step: f64) -> usize {
    let n = ((end - start) / step).ceil();
    if n > 0.0 { n as usize } else { 0 }
}
