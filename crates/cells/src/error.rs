//! Error types for the cmpi-cells crate.

use cmpi_climate::ClimateError;
use cmpi_index::IndexError;

/// Error type for all fallible operations in the cmpi-cells crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CellError {
    /// Returned when a coordinate is outside its valid range.
    #[error("invalid {field}: {value} (expected {expected})")]
    InvalidCoordinate {
        /// `latitude` or `longitude`.
        field: &'static str,
        /// Value supplied.
        value: f64,
        /// Valid range.
        expected: &'static str,
    },

    /// Returned when a bounding box or grid resolution is unusable.
    #[error("invalid bounding box: {reason}")]
    InvalidBoundingBox {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when no climate grid points are available.
    #[error("climate grid is empty")]
    EmptyGrid,

    /// Returned when two grid points share an id.
    #[error("duplicate grid point id: {id}")]
    DuplicateGridPoint {
        /// The repeated id.
        id: String,
    },

    /// Returned when two cell specs share an id.
    #[error("duplicate cell id: {id}")]
    DuplicateCell {
        /// The repeated id.
        id: String,
    },

    /// Returned when two households share an id.
    #[error("duplicate household id: {id}")]
    DuplicateHousehold {
        /// The repeated id.
        id: String,
    },

    /// Returned when a household references a cell that does not exist.
    #[error("household {household} references unknown cell {cell}")]
    UnknownCell {
        /// Household id.
        household: String,
        /// Cell id it references.
        cell: String,
    },

    /// Climate profile construction failed.
    #[error(transparent)]
    Climate(#[from] ClimateError),

    /// Scoring or weight adjustment failed.
    #[error(transparent)]
    Index(#[from] IndexError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_cell() {
        let err = CellError::UnknownCell {
            household: "W009_HH001".to_string(),
            cell: "W009".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "household W009_HH001 references unknown cell W009"
        );
    }

    #[test]
    fn display_invalid_coordinate() {
        let err = CellError::InvalidCoordinate {
            field: "latitude",
            value: 95.0,
            expected: "[-90, 90]",
        };
        assert_eq!(err.to_string(), "invalid latitude: 95 (expected [-90, 90])");
    }

    #[test]
    fn index_errors_pass_through() {
        let err: CellError = IndexError::InvalidConfig {
            reason: "cutoff must be in (0, 1], got 0".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: cutoff must be in (0, 1], got 0"
        );
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<CellError>();
    }
}
