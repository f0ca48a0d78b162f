//! Gridded climate input.

use std::collections::HashSet;

use cmpi_climate::ClimateSeries;

use crate::error::CellError;
use crate::geo::GeoPoint;

/// One climate grid point and its time series.
#[derive(Debug, Clone)]
pub struct GridPoint {
    pub id: String,
    pub location: GeoPoint,
    pub series: ClimateSeries,
}

/// Climate time series on a set of grid points.
#[derive(Debug, Clone, Default)]
pub struct ClimateGrid {
    points: Vec<GridPoint>,
}

impl ClimateGrid {
    /// # Errors
    ///
    /// Returns [`CellError::DuplicateGridPoint`] if two points share an id.
    pub fn new(points: Vec<GridPoint>) -> Result<Self, CellError> {
        let mut seen = HashSet::with_capacity(points.len());
        for p in &points {
            if !seen.insert(p.id.as_str()) {
                return Err(CellError::DuplicateGridPoint { id: p.id.clone() });
            }
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[GridPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&GridPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Grid point closest to `target` by squared degree distance. Ties go to
    /// the lexicographically lowest id. `None` only when the grid is empty.
    pub fn nearest(&self, target: &GeoPoint) -> Option<&GridPoint> {
        self.points.iter().min_by(|a, b| {
            let da = a.location.squared_distance(target);
            let db = b.location.squared_distance(target);
            da.total_cmp(&db).then_with(|| a.id.cmp(&b.id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(id: &str, lat: f64, lon: f64) -> GridPoint {
        let ts = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        GridPoint {
            id: id.to_string(),
            location: GeoPoint::new(lat, lon).unwrap(),
            series: ClimateSeries::new(vec![ts], vec![20.0], vec![0.0], None).unwrap(),
        }
    }

    #[test]
    fn nearest_picks_minimum_distance() {
        let grid = ClimateGrid::new(vec![
            point("a", -30.0, 30.5),
            point("b", -29.75, 30.75),
            point("c", -29.5, 31.0),
        ])
        .unwrap();
        let target = GeoPoint::new(-29.8, 30.8).unwrap();
        assert_eq!(grid.nearest(&target).unwrap().id, "b");
    }

    #[test]
    fn ties_go_to_lowest_id() {
        let grid = ClimateGrid::new(vec![point("z", 0.0, 1.0), point("m", 0.0, -1.0)]).unwrap();
        let target = GeoPoint::new(0.0, 0.0).unwrap();
        assert_eq!(grid.nearest(&target).unwrap().id, "m");
    }

    #[test]
    fn empty_grid_has_no_nearest() {
        let grid = ClimateGrid::default();
        assert!(grid.nearest(&GeoPoint::new(0.0, 0.0).unwrap()).is_none());
    }

    #[test]
    fn duplicate_ids_rejected() {
        let err = ClimateGrid::new(vec![point("a", 0.0, 0.0), point("a", 1.0, 1.0)]).unwrap_err();
        assert!(matches!(err, CellError::DuplicateGridPoint { .. }));
    }
}
