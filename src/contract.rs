//! The embedded contract documents
//!
//! The crate ships its two draft-07 schema documents inside the binary so
//! producers and consumers validate against the exact revision they were
//! built with. `Contract::fingerprint` gives both sides a cheap way to
//! confirm they agree on the same revision.

use include_dir::{include_dir, Dir};
use serde_json::Value;

use crate::checksum::Checksum;
use crate::error::{GardenError, Result};

static CONTRACT_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/schemas");

/// Which contract document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractKind {
    /// The top-level garden record: area, water, weeks, yield expectations
    Garden,
    /// A single plant's growth profile
    Plant,
}

impl ContractKind {
    /// File name of the embedded document
    pub fn file_name(&self) -> &'static str {
        match self {
            ContractKind::Garden => "garden.schema.json",
            ContractKind::Plant => "plant.schema.json",
        }
    }

    /// All contract kinds
    pub fn all() -> [ContractKind; 2] {
        [ContractKind::Garden, ContractKind::Plant]
    }
}

impl std::str::FromStr for ContractKind {
    type Err = GardenError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "garden" => Ok(ContractKind::Garden),
            "plant" => Ok(ContractKind::Plant),
            other => Err(GardenError::UnknownContract(other.to_string())),
        }
    }
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractKind::Garden => write!(f, "garden"),
            ContractKind::Plant => write!(f, "plant"),
        }
    }
}

/// A parsed contract document
#[derive(Debug, Clone)]
pub struct Contract {
    /// Which document this is
    pub kind: ContractKind,
    /// The schema document itself
    pub document: Value,
}

impl Contract {
    /// Load an embedded contract document
    pub fn load(kind: ContractKind) -> Result<Self> {
        let file = CONTRACT_DIR
            .get_file(kind.file_name())
            .ok_or_else(|| GardenError::UnknownContract(kind.to_string()))?;

        let document: Value = serde_json::from_slice(file.contents())?;
        Ok(Self { kind, document })
    }

    /// Fingerprint of this contract revision
    pub fn fingerprint(&self) -> Checksum {
        Checksum::from_json(&self.document)
    }

    /// The fields an instance must carry to satisfy this contract
    pub fn required_fields(&self) -> Vec<&str> {
        self.document
            .get("required")
            .and_then(Value::as_array)
            .map(|reqs| reqs.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}
