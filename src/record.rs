//! Native types for garden records
//!
//! These are plain serde structs, deliberately decoupled from validation:
//! deserializing a `GardenRecord` never runs the contract checks, so the
//! types stay usable on construction paths that already trust their input.
//! Run instances through [`crate::validate::ContractValidator`] when the
//! contract must be enforced.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A garden's resource profile and yield expectations
///
/// The contract permits fields beyond the ones listed here; they are
/// captured in `extra` so a record round-trips without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenRecord {
    /// Garden area in square feet
    pub sqft: f64,
    /// Greywater volume available per week
    pub greywater: f64,
    /// Rainwater volume available per week
    pub rainwater: f64,
    /// Duration of the growing period in weeks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weeks: Option<u32>,
    /// Per-plant yield expectations, order preserved
    pub yields: Vec<YieldEntry>,
    /// Fields outside the contract, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Expected yield bounds for one plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldEntry {
    /// Plant identifier
    pub plant: String,
    /// Minimum expected yield
    pub min_yield: f64,
    /// Maximum expected yield
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_yield: Option<f64>,
    /// Maximum yield as a fraction of total yield
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_yield_pct: Option<f64>,
    /// Fields outside the contract, preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GardenRecord {
    /// Total water volume available per week
    pub fn total_water(&self) -> f64 {
        self.greywater + self.rainwater
    }

    /// Yield expectation for a plant, if one was recorded
    pub fn yield_for(&self, plant: &str) -> Option<&YieldEntry> {
        self.yields.iter().find(|y| y.plant == plant)
    }
}
