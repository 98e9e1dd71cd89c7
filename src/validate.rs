//! Contract enforcement
//!
//! Wraps the compiled contract documents and turns `jsonschema` errors into
//! structured, enumerable violations. Validation never stops at the first
//! problem and never aborts: every violation in a record is collected so a
//! producer can fix them all in one pass.

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::paths::{JSONPointer, PathChunk};
use jsonschema::{Draft, JSONSchema, ValidationError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::contract::{Contract, ContractKind};
use crate::error::{GardenError, Result};
use crate::record::GardenRecord;

/// What went wrong at one path in an instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required field is absent
    MissingField { field: String },
    /// A field is present with the wrong JSON type
    WrongType { expected: String, actual: String },
    /// Any other schema violation
    Other,
}

/// A single contract violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field path in bracketed form, e.g. `yields[2].min_yield`
    pub path: String,
    #[serde(flatten)]
    pub kind: ViolationKind,
    /// Human-readable description from the validator
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// Every violation found in one instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether the instance satisfied the contract
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Paths of all missing required fields
    pub fn missing_fields(&self) -> Vec<&str> {
        self.violations
            .iter()
            .filter(|v| matches!(v.kind, ViolationKind::MissingField { .. }))
            .map(|v| v.path.as_str())
            .collect()
    }
}

/// Validates instances against the embedded contract documents
pub struct ContractValidator {
    garden_contract: Contract,
    plant_contract: Contract,
    garden: JSONSchema,
    plant: JSONSchema,
}

impl ContractValidator {
    /// Compile both embedded contracts
    pub fn new() -> Result<Self> {
        let garden_contract = Contract::load(ContractKind::Garden)?;
        let plant_contract = Contract::load(ContractKind::Plant)?;
        let garden = compile(&garden_contract)?;
        let plant = compile(&plant_contract)?;

        Ok(Self {
            garden_contract,
            plant_contract,
            garden,
            plant,
        })
    }

    /// The contract document for a kind
    pub fn contract(&self, kind: ContractKind) -> &Contract {
        match kind {
            ContractKind::Garden => &self.garden_contract,
            ContractKind::Plant => &self.plant_contract,
        }
    }

    /// Validate an instance against a contract, collecting every violation
    pub fn validate(&self, kind: ContractKind, instance: &Value) -> ValidationReport {
        let compiled = match kind {
            ContractKind::Garden => &self.garden,
            ContractKind::Plant => &self.plant,
        };

        let mut violations = Vec::new();
        if let Err(errors) = compiled.validate(instance) {
            for error in errors {
                violations.push(to_violation(&error));
            }
        }

        debug!(
            contract = %kind,
            violations = violations.len(),
            "validated instance"
        );
        ValidationReport { violations }
    }

    /// Validate a garden record instance
    pub fn validate_garden(&self, instance: &Value) -> ValidationReport {
        self.validate(ContractKind::Garden, instance)
    }

    /// Validate a plant instance
    pub fn validate_plant(&self, instance: &Value) -> ValidationReport {
        self.validate(ContractKind::Plant, instance)
    }

    /// Validate, then deserialize into the native record type
    pub fn check_garden(&self, instance: &Value) -> Result<GardenRecord> {
        let report = self.validate_garden(instance);
        if !report.is_valid() {
            return Err(GardenError::invalid("garden record", report));
        }
        Ok(serde_json::from_value(instance.clone())?)
    }

    /// Validate, then deserialize into the native crop type
    pub fn check_plant(&self, instance: &Value) -> Result<crate::crop::Crop> {
        let report = self.validate_plant(instance);
        if !report.is_valid() {
            return Err(GardenError::invalid("plant record", report));
        }
        Ok(serde_json::from_value(instance.clone())?)
    }
}

fn compile(contract: &Contract) -> Result<JSONSchema> {
    JSONSchema::options()
        .with_draft(Draft::Draft7)
        .compile(&contract.document)
        .map_err(|e| GardenError::InvalidContract {
            name: contract.kind.to_string(),
            reason: e.to_string(),
        })
}

fn to_violation(error: &ValidationError<'_>) -> Violation {
    let message = error.to_string();
    let base_path = field_path(&error.instance_path);

    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let field = property.as_str().unwrap_or_default().to_string();
            let path = if base_path.is_empty() {
                field.clone()
            } else {
                format!("{}.{}", base_path, field)
            };
            Violation {
                path,
                kind: ViolationKind::MissingField { field },
                message,
            }
        }
        ValidationErrorKind::Type { kind } => Violation {
            path: base_path,
            kind: ViolationKind::WrongType {
                expected: expected_types(kind),
                actual: json_type_name(&error.instance).to_string(),
            },
            message,
        },
        _ => Violation {
            path: base_path,
            kind: ViolationKind::Other,
            message,
        },
    }
}

/// Render a JSON pointer as a bracketed field path, e.g. `yields[2].min_yield`
fn field_path(pointer: &JSONPointer) -> String {
    let mut out = String::new();
    for chunk in pointer.iter() {
        match chunk {
            PathChunk::Property(name) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(name);
            }
            PathChunk::Index(idx) => {
                out.push_str(&format!("[{}]", idx));
            }
            PathChunk::Keyword(_) => {}
        }
    }
    out
}

fn expected_types(kind: &TypeKind) -> String {
    match kind {
        TypeKind::Single(t) => t.to_string(),
        TypeKind::Multiple(types) => {
            let names: Vec<String> = (*types).into_iter().map(|t| t.to_string()).collect();
            names.join(" or ")
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
