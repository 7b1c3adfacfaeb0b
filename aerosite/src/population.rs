//! Population density bands used by the ground risk assessment.

use serde::{Deserialize, Serialize};

/// Population density band of the area overflown by an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PopulationCategory {
    /// Controlled ground area, no uninvolved people.
    Controlled,
    /// Remote area.
    Remote,
    /// Lightly populated area.
    LightlyPopulated,
    /// Sparsely populated area.
    SparselyPopulated,
    /// Suburban area.
    Suburban,
    /// High density urban area.
    HighDensity,
    /// Assembly of people.
    Assembly,
}

/// All population categories from the lowest density to the highest.
pub const POPULATION_CATEGORIES: [PopulationCategory; 7] = [
    PopulationCategory::Controlled,
    PopulationCategory::Remote,
    PopulationCategory::LightlyPopulated,
    PopulationCategory::SparselyPopulated,
    PopulationCategory::Suburban,
    PopulationCategory::HighDensity,
    PopulationCategory::Assembly,
];

impl PopulationCategory {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            PopulationCategory::Controlled => "Controlled Ground Area",
            PopulationCategory::Remote => "Remote",
            PopulationCategory::LightlyPopulated => "Lightly Populated",
            PopulationCategory::SparselyPopulated => "Sparsely Populated",
            PopulationCategory::Suburban => "Suburban / Populated",
            PopulationCategory::HighDensity => "High Density Metropolitan",
            PopulationCategory::Assembly => "Assembly of People",
        }
    }

    /// Upper bound of the band in people per km². `None` if the band is not bounded by density.
    pub fn max_density(&self) -> Option<u32> {
        match self {
            PopulationCategory::Controlled => None,
            PopulationCategory::Remote => Some(5),
            PopulationCategory::LightlyPopulated => Some(50),
            PopulationCategory::SparselyPopulated => Some(500),
            PopulationCategory::Suburban => Some(5_000),
            PopulationCategory::HighDensity => Some(50_000),
            PopulationCategory::Assembly => None,
        }
    }

    /// Short description of the band.
    pub fn description(&self) -> &'static str {
        match self {
            PopulationCategory::Controlled => "Only involved persons present",
            PopulationCategory::Remote => "Less than 5 people per km²",
            PopulationCategory::LightlyPopulated => "5 to 50 people per km²",
            PopulationCategory::SparselyPopulated => "50 to 500 people per km²",
            PopulationCategory::Suburban => "500 to 5,000 people per km²",
            PopulationCategory::HighDensity => "More than 5,000 people per km²",
            PopulationCategory::Assembly => "Gatherings of people, events",
        }
    }

    /// Smallest density-bounded band that covers the given density.
    pub fn from_density(people_per_km2: f64) -> Self {
        POPULATION_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.covers(people_per_km2))
            .unwrap_or(PopulationCategory::HighDensity)
    }

    fn covers(&self, people_per_km2: f64) -> bool {
        self.max_density()
            .is_some_and(|max| people_per_km2 < max as f64)
    }
}
