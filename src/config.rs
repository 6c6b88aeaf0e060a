//! Configuration of a transmission network analysis.

use crate::error::AnalysisError;
use crate::nexus::Burnin;
use serde::{Deserialize, Serialize};

/// Settings of one analysis run.
///
/// Deserializes with defaults for every missing field, so an empty JSON object
/// is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Percentage of trees to discard as burnin
    #[serde(default = "default_burnin_percent")]
    pub burnin_percent: u32,
    /// Minimum probability for an edge to be listed
    #[serde(default = "default_min_value")]
    pub min_value: f64,
    /// Skip the first tree before applying burnin
    #[serde(default)]
    pub skip_first: bool,
    /// Classify trees on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
    /// Also write the network as JSON
    #[serde(default)]
    pub json: bool,
}

fn default_burnin_percent() -> u32 {
    20
}
fn default_min_value() -> f64 {
    0.1
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            burnin_percent: default_burnin_percent(),
            min_value: default_min_value(),
            skip_first: false,
            parallel: false,
            json: false,
        }
    }
}

impl AnalysisConfig {
    /// Checks that burnin leaves at least part of the sample and the edge
    /// threshold is a non-negative number.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.burnin_percent >= 100 {
            return Err(AnalysisError::invalid_config(format!(
                "burnin must be below 100%, got {}%",
                self.burnin_percent
            )));
        }
        if !(self.min_value >= 0.0) {
            return Err(AnalysisError::invalid_config(format!(
                "minimum value must be non-negative, got {}",
                self.min_value
            )));
        }
        Ok(())
    }

    /// Burnin as understood by the tree sample reader.
    pub fn burnin(&self) -> Burnin {
        Burnin::Percent(self.burnin_percent)
    }
}
