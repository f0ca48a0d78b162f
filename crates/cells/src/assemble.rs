//! Joins cell specs, climate grid and households into cells.

use std::collections::{BTreeMap, HashMap, HashSet};

use cmpi_climate::{ClimateProfile, HarshnessConfig, build_profile};
use cmpi_context::ContextFactors;
use cmpi_index::Household;
use tracing::{debug, info, warn};

use crate::cell::{CellSpec, GeographicCell, UrbanizationSource};
use crate::error::CellError;
use crate::grid::ClimateGrid;

/// Configuration for [`assemble_cells`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembleConfig {
    harshness: HarshnessConfig,
}

impl AssembleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_harshness(mut self, harshness: HarshnessConfig) -> Self {
        self.harshness = harshness;
        self
    }

    pub fn harshness(&self) -> &HarshnessConfig {
        &self.harshness
    }

    /// # Errors
    ///
    /// Propagates [`HarshnessConfig::validate`] failures.
    pub fn validate(&self) -> Result<(), CellError> {
        self.harshness.validate()?;
        Ok(())
    }
}

/// Builds one [`GeographicCell`] per spec.
///
/// Each cell takes the climate profile of its nearest grid point; profiles
/// are computed once per grid point in use. Households are attached to the
/// cell named by their cell id, keeping input order. Cells without
/// households are kept. Output order follows `specs`.
///
/// # Errors
///
/// - [`CellError::EmptyGrid`] if `grid` has no points.
/// - [`CellError::DuplicateCell`] / [`CellError::DuplicateHousehold`] on
///   repeated ids.
/// - [`CellError::UnknownCell`] if a household names a missing cell.
/// - [`CellError::Climate`] if the harshness configuration is invalid.
#[tracing::instrument(skip_all, fields(cells = specs.len(), households = households.len()))]
pub fn assemble_cells(
    specs: Vec<CellSpec>,
    households: Vec<Household>,
    grid: &ClimateGrid,
    config: &AssembleConfig,
) -> Result<Vec<GeographicCell>, CellError> {
    config.validate()?;
    if grid.is_empty() {
        return Err(CellError::EmptyGrid);
    }

    let mut index: HashMap<String, usize> = HashMap::with_capacity(specs.len());
    for (i, spec) in specs.iter().enumerate() {
        if index.insert(spec.id.clone(), i).is_some() {
            return Err(CellError::DuplicateCell {
                id: spec.id.clone(),
            });
        }
    }

    let mut members: Vec<Vec<Household>> = vec![Vec::new(); specs.len()];
    let mut seen = HashSet::with_capacity(households.len());
    for h in households {
        if !seen.insert(h.id().to_string()) {
            return Err(CellError::DuplicateHousehold {
                id: h.id().to_string(),
            });
        }
        let Some(&slot) = index.get(h.cell_id()) else {
            return Err(CellError::UnknownCell {
                household: h.id().to_string(),
                cell: h.cell_id().to_string(),
            });
        };
        members[slot].push(h);
    }

    let mut profiles: BTreeMap<String, ClimateProfile> = BTreeMap::new();
    let mut cells = Vec::with_capacity(specs.len());

    for (spec, households) in specs.into_iter().zip(members) {
        let point = grid.nearest(&spec.location).ok_or(CellError::EmptyGrid)?;
        let climate = match profiles.get(&point.id) {
            Some(p) => p.clone(),
            None => {
                let p = build_profile(&point.series, config.harshness())?;
                profiles.insert(point.id.clone(), p.clone());
                p
            }
        };

        let context = ContextFactors::from_profile(&climate, spec.urbanization.urbanization());
        let demographics = match spec.urbanization {
            UrbanizationSource::Demographics(d) => Some(d),
            UrbanizationSource::Level(_) => None,
        };

        if households.is_empty() {
            warn!(cell = %spec.id, "cell has no households");
        }
        debug!(
            cell = %spec.id,
            grid_point = %point.id,
            harshness = context.climate_harshness(),
            urbanization = context.urbanization(),
            households = households.len(),
            "assembled cell"
        );

        cells.push(GeographicCell {
            id: spec.id,
            name: spec.name,
            location: spec.location,
            grid_point: point.id.clone(),
            climate,
            context,
            demographics,
            households,
        });
    }

    info!(
        cells = cells.len(),
        grid_points_used = profiles.len(),
        "cells assembled"
    );
    Ok(cells)
}
