//! Households and their binary deprivation profiles.

use serde::Serialize;
use serde::ser::{SerializeSeq, Serializer};

use crate::error::IndexError;
use crate::indicator::Indicator;

/// Binary deprivation flags, one per indicator (`true` = deprived).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deprivations {
    flags: [bool; Indicator::COUNT],
}

impl Deprivations {
    /// No deprivations.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn from_flags(flags: [bool; Indicator::COUNT]) -> Self {
        Self { flags }
    }

    /// Deprived in exactly the listed indicators.
    pub fn from_indicators(indicators: &[Indicator]) -> Self {
        let mut flags = [false; Indicator::COUNT];
        for ind in indicators {
            flags[ind.index()] = true;
        }
        Self { flags }
    }

    /// Parses numeric indicator values, each of which must be exactly 0 or 1.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::MalformedHousehold`] for the first value that is
    /// not exactly 0 or 1. Values are never coerced.
    pub fn from_values(
        household: &str,
        values: [f64; Indicator::COUNT],
    ) -> Result<Self, IndexError> {
        let mut flags = [false; Indicator::COUNT];
        for ind in Indicator::ALL {
            let value = values[ind.index()];
            flags[ind.index()] = if value == 1.0 {
                true
            } else if value == 0.0 {
                false
            } else {
                return Err(IndexError::MalformedHousehold {
                    household: household.to_string(),
                    indicator: ind,
                    value,
                });
            };
        }
        Ok(Self { flags })
    }

    pub fn is_deprived(&self, indicator: Indicator) -> bool {
        self.flags[indicator.index()]
    }

    /// Sets one flag.
    pub fn set(&mut self, indicator: Indicator, deprived: bool) {
        self.flags[indicator.index()] = deprived;
    }

    /// Number of indicators in which the household is deprived.
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&f| f).count()
    }

    /// Deprived indicators in canonical order.
    pub fn deprived(&self) -> impl Iterator<Item = Indicator> + '_ {
        Indicator::ALL
            .into_iter()
            .filter(move |&i| self.is_deprived(i))
    }

    /// Flags as 0/1 values in canonical order.
    pub fn values(&self) -> [f64; Indicator::COUNT] {
        self.flags.map(|f| if f { 1.0 } else { 0.0 })
    }
}

impl Serialize for Deprivations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.count()))?;
        for ind in self.deprived() {
            seq.serialize_element(ind.name())?;
        }
        seq.end()
    }
}

/// A surveyed household belonging to one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Household {
    id: String,
    cell_id: String,
    deprivations: Deprivations,
    size: u32,
    children: Option<u32>,
}

impl Household {
    /// Creates a single-person household.
    pub fn new(
        id: impl Into<String>,
        cell_id: impl Into<String>,
        deprivations: Deprivations,
    ) -> Self {
        Self {
            id: id.into(),
            cell_id: cell_id.into(),
            deprivations,
            size: 1,
            children: None,
        }
    }

    /// Sets household size (at least 1).
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size.max(1);
        self
    }

    pub fn with_children(mut self, children: u32) -> Self {
        self.children = Some(children);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn cell_id(&self) -> &str {
        &self.cell_id
    }

    pub fn deprivations(&self) -> &Deprivations {
        &self.deprivations
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn children(&self) -> Option<u32> {
        self.children
    }
}
