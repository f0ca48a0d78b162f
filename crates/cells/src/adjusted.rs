//! Standard and climate-adjusted MPI over assembled cells.

use serde::Serialize;
use tracing::info;

use cmpi_climate::ClimateProfile;
use cmpi_context::ContextFactors;
use cmpi_index::{
    AdjustedWeights, AdjustmentRules, MpiConfig, MpiResult, MpiSummary, WeightVector,
    adjusted_weights, compute_standard_mpi,
};

use crate::cell::GeographicCell;
use crate::error::CellError;

/// Results for one cell under both weighting schemes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellMpi {
    pub cell_id: String,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub climate: ClimateProfile,
    pub context: ContextFactors,
    pub adjusted_weights: AdjustedWeights,
    pub standard: MpiResult,
    pub adjusted: MpiResult,
}

/// Per-cell results plus summaries pooled over every household.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdjustedMpiResult {
    pub standard_weights: WeightVector,
    pub cells: Vec<CellMpi>,
    pub standard: MpiSummary,
    pub adjusted: MpiSummary,
}

/// Scores every cell's households under the standard weights and under the
/// cell's adjusted weights.
///
/// Overall summaries pool household scores across cells, so larger cells
/// carry more weight. Pure: the same input always yields the same result.
///
/// # Errors
///
/// Returns [`CellError::Index`] if the standard weights, rules or config are
/// invalid, or if an adjusted vector breaks the sum-to-one contract.
#[tracing::instrument(skip_all, fields(cells = cells.len()))]
pub fn compute_adjusted_mpi(
    cells: &[GeographicCell],
    standard_weights: &WeightVector,
    rules: &AdjustmentRules,
    config: &MpiConfig,
) -> Result<AdjustedMpiResult, CellError> {
    standard_weights.validate()?;
    rules.validate()?;
    config.validate()?;

    let mut out = Vec::with_capacity(cells.len());
    for cell in cells {
        let weights = adjusted_weights(standard_weights, cell.context(), rules)?;
        let standard = compute_standard_mpi(cell.households(), standard_weights, config)?;
        let adjusted = compute_standard_mpi(cell.households(), &weights.weights, config)?;
        out.push(CellMpi {
            cell_id: cell.id().to_string(),
            name: cell.name().map(str::to_string),
            lat: cell.location().lat(),
            lon: cell.location().lon(),
            climate: cell.climate().clone(),
            context: cell.context().clone(),
            adjusted_weights: weights,
            standard,
            adjusted,
        });
    }

    let standard = MpiSummary::from_scores(out.iter().flat_map(|c| &c.standard.households));
    let adjusted = MpiSummary::from_scores(out.iter().flat_map(|c| &c.adjusted.households));

    info!(
        households = standard.total,
        standard_mpi = standard.mpi,
        adjusted_mpi = adjusted.mpi,
        "computed standard and adjusted MPI"
    );

    Ok(AdjustedMpiResult {
        standard_weights: *standard_weights,
        cells: out,
        standard,
        adjusted,
    })
}
