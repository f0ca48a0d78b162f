//! # cmpi-cells
//!
//! Joins the climate grid, cell descriptions and surveyed households into
//! [`GeographicCell`]s, then computes the standard and climate-adjusted MPI
//! for every cell.
//!
//! ```text
//! CellSpec + ClimateGrid + Household  --assemble_cells-->  GeographicCell
//! GeographicCell  --compute_adjusted_mpi-->  AdjustedMpiResult  --compare-->  ComparisonReport
//! ```

mod adjusted;
mod assemble;
mod cell;
mod compare;
mod error;
mod geo;
mod grid;

pub use adjusted::{AdjustedMpiResult, CellMpi, compute_adjusted_mpi};
pub use assemble::{AssembleConfig, assemble_cells};
pub use cell::{CellSpec, GeographicCell, UrbanizationSource};
pub use compare::{CellComparison, ComparisonReport, HouseholdComparison, compare};
pub use error::CellError;
pub use geo::{BoundingBox, GeoPoint};
pub use grid::{ClimateGrid, GridPoint};
