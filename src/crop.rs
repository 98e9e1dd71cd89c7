//! Crop profiles and the companion-planting catalog
//!
//! A catalog starts from the plant files' base crops and derives one
//! companion entry for every (crop, listed companion) pair. A companion
//! planting shares a bed, so the shorter-lived partner is replanted for as
//! many full lifespans as fit inside the longer one, and its yield and
//! nitrogen contribution scale accordingly.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;
use walkdir::WalkDir;

use crate::error::{GardenError, Result};
use crate::validate::ContractValidator;

/// Growth profile for a single plantable crop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    /// Crop identifier
    pub name: String,
    /// Names of crops this one can share a bed with
    pub companions: Vec<String>,
    /// Whether the crop tolerates greywater irrigation
    pub greywater_ok: bool,
    /// Expected yield per square foot per planting
    #[serde(rename = "yield")]
    pub yield_per_sqft: f64,
    /// Water consumed per square foot per week
    pub water_use: f64,
    /// Soil nitrogen change per square foot over a lifespan
    pub delta_n: f64,
    /// Weeks from planting to harvest
    pub lifespan: u32,
    /// Whether the crop may be left unharvested
    pub is_cover_crop: bool,
}

/// Two crops sharing a bed for the longer of their lifespans
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanionCrop {
    /// Combined identifier, `first-second`
    pub name: String,
    pub first_name: String,
    pub second_name: String,
    /// First crop's yield over the combined lifespan
    pub first_yield: f64,
    /// Second crop's yield over the combined lifespan
    pub second_yield: f64,
    pub greywater_ok: bool,
    pub water_use: f64,
    pub delta_n: f64,
    pub lifespan: u32,
    pub is_cover_crop: bool,
}

impl CompanionCrop {
    /// Derive the combined profile for two crops sharing a bed
    ///
    /// The shorter-lived partner is replanted `longest / lifespan` times
    /// (whole plantings only), scaling its yield and nitrogen contribution.
    pub fn derive(first: &Crop, second: &Crop) -> Self {
        let lifespan = first.lifespan.max(second.lifespan);
        let first_multiplier = (lifespan / first.lifespan.max(1)) as f64;
        let second_multiplier = (lifespan / second.lifespan.max(1)) as f64;
        let first_yield = first_multiplier * first.yield_per_sqft;
        let second_yield = second_multiplier * second.yield_per_sqft;

        Self {
            name: format!("{}-{}", first.name, second.name),
            first_name: first.name.clone(),
            second_name: second.name.clone(),
            first_yield,
            second_yield,
            greywater_ok: first.greywater_ok && second.greywater_ok,
            water_use: first.water_use + second.water_use,
            delta_n: first.delta_n * first_multiplier + second.delta_n * second_multiplier,
            lifespan,
            is_cover_crop: first.is_cover_crop && second.is_cover_crop,
        }
    }

    /// Combined yield of both partners
    pub fn total_yield(&self) -> f64 {
        self.first_yield + self.second_yield
    }
}

/// A base crop or a derived companion planting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum CatalogEntry {
    Single(Crop),
    Companion(CompanionCrop),
}

impl CatalogEntry {
    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::Single(c) => &c.name,
            CatalogEntry::Companion(c) => &c.name,
        }
    }

    pub fn water_use(&self) -> f64 {
        match self {
            CatalogEntry::Single(c) => c.water_use,
            CatalogEntry::Companion(c) => c.water_use,
        }
    }

    pub fn greywater_ok(&self) -> bool {
        match self {
            CatalogEntry::Single(c) => c.greywater_ok,
            CatalogEntry::Companion(c) => c.greywater_ok,
        }
    }

    pub fn lifespan(&self) -> u32 {
        match self {
            CatalogEntry::Single(c) => c.lifespan,
            CatalogEntry::Companion(c) => c.lifespan,
        }
    }

    pub fn is_cover_crop(&self) -> bool {
        match self {
            CatalogEntry::Single(c) => c.is_cover_crop,
            CatalogEntry::Companion(c) => c.is_cover_crop,
        }
    }

    pub fn total_yield(&self) -> f64 {
        match self {
            CatalogEntry::Single(c) => c.yield_per_sqft,
            CatalogEntry::Companion(c) => c.total_yield(),
        }
    }

    /// This entry's yield toward a target plant, if it grows it
    pub fn yield_toward(&self, target: &str) -> Option<f64> {
        match self {
            CatalogEntry::Single(c) if c.name == target => Some(c.yield_per_sqft),
            CatalogEntry::Companion(c) if c.first_name == target => Some(c.first_yield),
            CatalogEntry::Companion(c) if c.second_name == target => Some(c.second_yield),
            _ => None,
        }
    }
}

/// All known crops plus their derived companion plantings
#[derive(Debug, Clone, Default)]
pub struct CropCatalog {
    entries: Vec<CatalogEntry>,
}

impl CropCatalog {
    /// Build a catalog from base crops, deriving companion entries
    pub fn from_crops(crops: Vec<Crop>) -> Self {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        let mut companions: Vec<CatalogEntry> = Vec::new();

        for crop in &crops {
            for companion_name in &crop.companions {
                if let Some(companion) = crops.iter().find(|c| &c.name == companion_name) {
                    companions.push(CatalogEntry::Companion(CompanionCrop::derive(
                        crop, companion,
                    )));
                }
            }
        }

        entries.extend(crops.into_iter().map(CatalogEntry::Single));
        entries.extend(companions);
        Self { entries }
    }

    /// Load and validate plant files, then build the catalog
    pub fn load(validator: &ContractValidator, paths: &[impl AsRef<Path>]) -> Result<Self> {
        let mut crops = Vec::new();
        for path in paths {
            crops.push(load_crop(validator, path.as_ref())?);
        }
        info!(crops = crops.len(), "loaded plant files");
        Ok(Self::from_crops(crops))
    }

    /// Load every `*.json` plant file under a directory, sorted for determinism
    pub fn load_dir(validator: &ContractValidator, dir: impl AsRef<Path>) -> Result<Self> {
        let mut paths: Vec<_> = WalkDir::new(dir.as_ref())
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().map(|ext| ext == "json").unwrap_or(false))
            .collect();
        paths.sort();
        Self::load(validator, &paths)
    }

    /// All catalog entries, base crops first
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Result<&CatalogEntry> {
        self.entries
            .iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| GardenError::CropNotFound(name.to_string()))
    }

    /// Names of all entries, companions included
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name()).collect()
    }

    /// Names of base crops only
    pub fn base_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                CatalogEntry::Single(c) => Some(c.name.as_str()),
                CatalogEntry::Companion(_) => None,
            })
            .collect()
    }

    /// Entries that can be irrigated with greywater
    pub fn greywater_entries(&self) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|e| e.greywater_ok()).collect()
    }

    /// Per-entry yield contributions toward a target plant
    ///
    /// Includes the target itself plus every companion planting that grows
    /// it, keyed by entry name.
    pub fn target_yields(&self, target: &str) -> BTreeMap<String, f64> {
        self.entries
            .iter()
            .filter_map(|e| e.yield_toward(target).map(|y| (e.name().to_string(), y)))
            .collect()
    }
}

fn load_crop(validator: &ContractValidator, path: &Path) -> Result<Crop> {
    let content = fs::read_to_string(path)?;
    let instance: serde_json::Value = serde_json::from_str(&content)?;

    let report = validator.validate_plant(&instance);
    if !report.is_valid() {
        return Err(GardenError::invalid(path.display().to_string(), report));
    }

    Ok(serde_json::from_value(instance)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop(name: &str, lifespan: u32, yield_per_sqft: f64, companions: &[&str]) -> Crop {
        Crop {
            name: name.to_string(),
            companions: companions.iter().map(|s| s.to_string()).collect(),
            greywater_ok: true,
            yield_per_sqft,
            water_use: 1.0,
            delta_n: -0.5,
            lifespan,
            is_cover_crop: false,
        }
    }

    #[test]
    fn test_companion_derivation_scales_shorter_partner() {
        let tomato = crop("tomato", 12, 1.2, &["carrot"]);
        let carrot = crop("carrot", 6, 0.8, &[]);

        let pair = CompanionCrop::derive(&tomato, &carrot);
        assert_eq!(pair.name, "tomato-carrot");
        assert_eq!(pair.lifespan, 12);
        // carrot fits twice inside tomato's lifespan
        assert_eq!(pair.first_yield, 1.2);
        assert_eq!(pair.second_yield, 1.6);
        assert_eq!(pair.total_yield(), 2.8);
        assert_eq!(pair.water_use, 2.0);
        assert_eq!(pair.delta_n, -0.5 - 1.0);
    }

    #[test]
    fn test_partial_lifespans_do_not_count() {
        // 12 / 7 == 1: only whole replantings scale the yield
        let long = crop("corn", 12, 2.0, &[]);
        let mid = crop("beans", 7, 1.0, &[]);
        let pair = CompanionCrop::derive(&long, &mid);
        assert_eq!(pair.second_yield, 1.0);
    }

    #[test]
    fn test_catalog_derives_listed_companions_only() {
        let crops = vec![
            crop("tomato", 12, 1.2, &["carrot"]),
            crop("carrot", 6, 0.8, &[]),
            crop("onion", 8, 0.5, &[]),
        ];
        let catalog = CropCatalog::from_crops(crops);

        assert_eq!(catalog.base_names(), vec!["tomato", "carrot", "onion"]);
        assert_eq!(
            catalog.names(),
            vec!["tomato", "carrot", "onion", "tomato-carrot"]
        );
        assert!(catalog.get("tomato-carrot").is_ok());
        assert!(matches!(
            catalog.get("tomato-onion"),
            Err(GardenError::CropNotFound(_))
        ));
    }

    #[test]
    fn test_target_yields_include_companion_share() {
        let crops = vec![
            crop("tomato", 12, 1.2, &["carrot"]),
            crop("carrot", 6, 0.8, &[]),
        ];
        let catalog = CropCatalog::from_crops(crops);

        let carrot_yields = catalog.target_yields("carrot");
        assert_eq!(carrot_yields.len(), 2);
        assert_eq!(carrot_yields["carrot"], 0.8);
        assert_eq!(carrot_yields["tomato-carrot"], 1.6);

        assert!(catalog.target_yields("kale").is_empty());
    }

    #[test]
    fn test_greywater_filter_uses_both_partners() {
        let mut thirsty = crop("lettuce", 4, 0.6, &[]);
        thirsty.greywater_ok = false;
        let crops = vec![crop("tomato", 12, 1.2, &["lettuce"]), thirsty];
        let catalog = CropCatalog::from_crops(crops);

        let greywater: Vec<_> = catalog
            .greywater_entries()
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(greywater, vec!["tomato"]);
    }
}
