use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use agrolytics_core::SimulationId;

use crate::scenario::{GrowthProjection, GrowthRates, GrowthScenario};

const DEFAULT_DESCRIPTION: &str = "Automatic simulation";

/// A named `(scenario, projection)` pair ready for an external store.
///
/// Building one has no side effects; the engine never persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub id: SimulationId,
    pub name: String,
    pub description: String,
    pub created_on: NaiveDate,
    pub parameters: GrowthRates,
    pub scenario: GrowthScenario,
    pub results: GrowthProjection,
}

impl SimulationRecord {
    /// Wrap a computed projection, named `"Simulation YYYY-MM-DD"` after `created_on`.
    pub fn new(scenario: GrowthScenario, results: GrowthProjection, created_on: NaiveDate) -> Self {
        Self {
            id: SimulationId::new(),
            name: format!("Simulation {}", created_on.format("%Y-%m-%d")),
            description: DEFAULT_DESCRIPTION.to_string(),
            created_on,
            parameters: scenario.rates,
            scenario,
            results,
        }
    }

    /// Override the default name; blank names keep the default.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.trim().is_empty() {
            self.name = name;
        }
        self
    }
}
