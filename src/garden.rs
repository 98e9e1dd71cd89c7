//! Loading a validated garden
//!
//! Pairs a garden record with the crop catalog its yield expectations refer
//! to. Every document is validated against its contract before it is
//! deserialized, and a failing file reports all of its violations at once.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::crop::CropCatalog;
use crate::error::{GardenError, Result};
use crate::record::GardenRecord;
use crate::validate::ContractValidator;

/// A validated garden record plus its crop catalog
#[derive(Debug, Clone)]
pub struct Garden {
    pub record: GardenRecord,
    pub catalog: CropCatalog,
}

impl Garden {
    /// Load a garden file and a set of plant files
    pub fn load(
        validator: &ContractValidator,
        garden_file: impl AsRef<Path>,
        plant_files: &[impl AsRef<Path>],
    ) -> Result<Self> {
        let record = load_record(validator, garden_file.as_ref())?;
        let catalog = CropCatalog::load(validator, plant_files)?;
        Ok(Self { record, catalog })
    }

    /// Load a garden file and every plant file under a directory
    pub fn load_dir(
        validator: &ContractValidator,
        garden_file: impl AsRef<Path>,
        plants_dir: impl AsRef<Path>,
    ) -> Result<Self> {
        let record = load_record(validator, garden_file.as_ref())?;
        let catalog = CropCatalog::load_dir(validator, plants_dir)?;
        Ok(Self { record, catalog })
    }

    /// Yield targets whose plant is missing from the catalog
    ///
    /// The contract does not require yield targets to name known plants, so
    /// this is a lookup helper for consumers that do care.
    pub fn unknown_yield_targets(&self) -> Vec<&str> {
        self.record
            .yields
            .iter()
            .map(|y| y.plant.as_str())
            .filter(|plant| self.catalog.target_yields(plant).is_empty())
            .collect()
    }
}

fn load_record(validator: &ContractValidator, path: &Path) -> Result<GardenRecord> {
    let content = fs::read_to_string(path)?;
    let instance: Value = serde_json::from_str(&content)?;

    let report = validator.validate_garden(&instance);
    if !report.is_valid() {
        return Err(GardenError::invalid(path.display().to_string(), report));
    }

    let record: GardenRecord = serde_json::from_value(instance)?;
    info!(
        sqft = record.sqft,
        yields = record.yields.len(),
        "loaded garden record"
    );
    Ok(record)
}
