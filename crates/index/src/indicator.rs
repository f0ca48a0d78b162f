//! The ten Alkire-Foster deprivation indicators and their dimensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IndexError;

/// MPI dimension. Each carries one third of the standard weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Health,
    Education,
    LivingStandards,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::Health,
        Dimension::Education,
        Dimension::LivingStandards,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dimension::Health => "health",
            Dimension::Education => "education",
            Dimension::LivingStandards => "living_standards",
        }
    }

    /// Indicators belonging to this dimension.
    pub fn indicators(self) -> impl Iterator<Item = Indicator> {
        Indicator::ALL
            .into_iter()
            .filter(move |i| i.dimension() == self)
    }
}

/// Deprivation indicator.
///
/// Declaration order is the canonical order used by weight vectors and
/// deprivation arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Nutrition,
    ChildMortality,
    YearsOfSchooling,
    SchoolAttendance,
    CookingFuel,
    Sanitation,
    DrinkingWater,
    Electricity,
    Housing,
    Assets,
}

impl Indicator {
    /// Number of indicators.
    pub const COUNT: usize = 10;

    /// All indicators in canonical order.
    pub const ALL: [Indicator; Indicator::COUNT] = [
        Indicator::Nutrition,
        Indicator::ChildMortality,
        Indicator::YearsOfSchooling,
        Indicator::SchoolAttendance,
        Indicator::CookingFuel,
        Indicator::Sanitation,
        Indicator::DrinkingWater,
        Indicator::Electricity,
        Indicator::Housing,
        Indicator::Assets,
    ];

    /// Position in canonical order.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn dimension(self) -> Dimension {
        match self {
            Indicator::Nutrition | Indicator::ChildMortality => Dimension::Health,
            Indicator::YearsOfSchooling | Indicator::SchoolAttendance => Dimension::Education,
            _ => Dimension::LivingStandards,
        }
    }

    /// Snake-case name, matching the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            Indicator::Nutrition => "nutrition",
            Indicator::ChildMortality => "child_mortality",
            Indicator::YearsOfSchooling => "years_of_schooling",
            Indicator::SchoolAttendance => "school_attendance",
            Indicator::CookingFuel => "cooking_fuel",
            Indicator::Sanitation => "sanitation",
            Indicator::DrinkingWater => "drinking_water",
            Indicator::Electricity => "electricity",
            Indicator::Housing => "housing",
            Indicator::Assets => "assets",
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Indicator {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Indicator::ALL
            .into_iter()
            .find(|i| i.name() == s)
            .ok_or_else(|| IndexError::UnknownIndicator {
                name: s.to_string(),
            })
    }
}
