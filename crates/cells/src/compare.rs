//! Standard vs adjusted comparison report.

use std::collections::BTreeMap;

use serde::Serialize;

use cmpi_index::{Indicator, MpiSummary};

use crate::adjusted::AdjustedMpiResult;

/// How one household's assessment changes under adjusted weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdComparison {
    pub household_id: String,
    pub cell_id: String,
    pub standard_score: f64,
    pub adjusted_score: f64,
    pub score_change: f64,
    pub standard_poor: bool,
    pub adjusted_poor: bool,
    pub classification_changed: bool,
}

/// How one cell's MPI and weights change under adjustment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellComparison {
    pub cell_id: String,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub climate_harshness: f64,
    pub urbanization: f64,
    pub standard_mpi: f64,
    pub adjusted_mpi: f64,
    pub mpi_change: f64,
    pub standard_headcount: f64,
    pub adjusted_headcount: f64,
    /// Adjusted minus standard weight, per indicator.
    pub weight_changes: BTreeMap<Indicator, f64>,
}

/// Full standard vs adjusted comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub standard: MpiSummary,
    pub adjusted: MpiSummary,
    pub mpi_change: f64,
    pub mean_score_change: f64,
    pub reclassified_to_poor: usize,
    pub reclassified_to_non_poor: usize,
    pub cells: Vec<CellComparison>,
    pub households: Vec<HouseholdComparison>,
}

/// Builds a [`ComparisonReport`] from an adjusted MPI result.
pub fn compare(result: &AdjustedMpiResult) -> ComparisonReport {
    let mut households = Vec::new();
    let mut cells = Vec::with_capacity(result.cells.len());

    for cell in &result.cells {
        for (s, a) in cell
            .standard
            .households
            .iter()
            .zip(&cell.adjusted.households)
        {
            households.push(HouseholdComparison {
                household_id: s.household_id.clone(),
                cell_id: s.cell_id.clone(),
                standard_score: s.score,
                adjusted_score: a.score,
                score_change: a.score - s.score,
                standard_poor: s.is_poor,
                adjusted_poor: a.is_poor,
                classification_changed: s.is_poor != a.is_poor,
            });
        }

        let weight_changes = Indicator::ALL
            .into_iter()
            .map(|ind| {
                let delta =
                    cell.adjusted_weights.weights.get(ind) - result.standard_weights.get(ind);
                (ind, delta)
            })
            .collect();

        cells.push(CellComparison {
            cell_id: cell.cell_id.clone(),
            name: cell.name.clone(),
            lat: cell.lat,
            lon: cell.lon,
            climate_harshness: cell.context.climate_harshness(),
            urbanization: cell.context.urbanization(),
            standard_mpi: cell.standard.summary.mpi,
            adjusted_mpi: cell.adjusted.summary.mpi,
            mpi_change: cell.adjusted.summary.mpi - cell.standard.summary.mpi,
            standard_headcount: cell.standard.summary.headcount_ratio,
            adjusted_headcount: cell.adjusted.summary.headcount_ratio,
            weight_changes,
        });
    }

    let reclassified_to_poor = households
        .iter()
        .filter(|h| h.adjusted_poor && !h.standard_poor)
        .count();
    let reclassified_to_non_poor = households
        .iter()
        .filter(|h| h.standard_poor && !h.adjusted_poor)
        .count();

    ComparisonReport {
        standard: result.standard.clone(),
        adjusted: result.adjusted.clone(),
        mpi_change: result.adjusted.mpi - result.standard.mpi,
        mean_score_change: result.adjusted.mean_score - result.standard.mean_score,
        reclassified_to_poor,
        reclassified_to_non_poor,
        cells,
        households,
    }
}
