//! Garden Data Contracts
//!
//! Contracts and validation for garden planning records: the shape of a
//! garden (area, water budget, growing period, yield expectations) and of
//! the plants it can grow.
//!
//! ## Features
//!
//! - **Embedded Contracts**: draft-07 schema documents compiled into the binary
//! - **Structured Violations**: every violation reported with its field path
//! - **Decoupled Types**: native serde types usable without forced validation
//! - **Fingerprinting**: SHA256 checksums to pin a contract revision
//! - **Crop Catalog**: companion-planting derivation over validated plant files
//!
//! ## Architecture
//!
//! ```text
//! schemas/
//! ├── garden.schema.json   (GardenRecord contract)
//! └── plant.schema.json    (Plant contract)
//!
//! producer ──▶ ContractValidator ──▶ GardenRecord / Crop ──▶ consumer
//!                    │
//!                    └──▶ ValidationReport (all violations, field paths)
//! ```

pub mod checksum;
pub mod config;
pub mod contract;
pub mod crop;
pub mod error;
pub mod garden;
pub mod record;
pub mod validate;

pub use checksum::Checksum;
pub use config::GardenConfig;
pub use contract::{Contract, ContractKind};
pub use crop::{CatalogEntry, CompanionCrop, Crop, CropCatalog};
pub use error::{GardenError, Result};
pub use garden::Garden;
pub use record::{GardenRecord, YieldEntry};
pub use validate::{ContractValidator, ValidationReport, Violation, ViolationKind};
