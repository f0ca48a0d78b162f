//! Geographic cells.

use cmpi_climate::ClimateProfile;
use cmpi_context::{CellDemographics, ContextFactors};
use cmpi_index::Household;

use crate::geo::GeoPoint;

/// Where a cell's urbanization comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum UrbanizationSource {
    /// Derived from density and the urban/rural index.
    Demographics(CellDemographics),
    /// Supplied directly (clamped to `[0, 1]`).
    Level(f64),
}

impl UrbanizationSource {
    pub fn urbanization(&self) -> f64 {
        match self {
            UrbanizationSource::Demographics(d) => d.urbanization(),
            UrbanizationSource::Level(u) => *u,
        }
    }
}

/// Input description of one cell, before climate and households are joined.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSpec {
    pub id: String,
    pub name: Option<String>,
    pub location: GeoPoint,
    pub urbanization: UrbanizationSource,
}

impl CellSpec {
    pub fn new(
        id: impl Into<String>,
        location: GeoPoint,
        urbanization: UrbanizationSource,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            location,
            urbanization,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A cell with its climate, context and member households joined.
///
/// Built by [`assemble_cells`](crate::assemble_cells); read-only afterwards.
#[derive(Debug, Clone)]
pub struct GeographicCell {
    pub(crate) id: String,
    pub(crate) name: Option<String>,
    pub(crate) location: GeoPoint,
    pub(crate) grid_point: String,
    pub(crate) climate: ClimateProfile,
    pub(crate) context: ContextFactors,
    pub(crate) demographics: Option<CellDemographics>,
    pub(crate) households: Vec<Household>,
}

impl GeographicCell {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn location(&self) -> GeoPoint {
        self.location
    }

    /// Id of the climate grid point the profile was built from.
    pub fn grid_point(&self) -> &str {
        &self.grid_point
    }

    pub fn climate(&self) -> &ClimateProfile {
        &self.climate
    }

    pub fn context(&self) -> &ContextFactors {
        &self.context
    }

    pub fn demographics(&self) -> Option<&CellDemographics> {
        self.demographics.as_ref()
    }

    pub fn households(&self) -> &[Household] {
        &self.households
    }
}
