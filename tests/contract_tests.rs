//! Contract Tests
//!
//! End-to-end checks of the garden and plant contracts: required-field sets,
//! type enforcement, violation paths, and lossless round-trips.

use std::path::Path;

use garden_schemas::{
    ContractValidator, Garden, GardenError, GardenRecord, ViolationKind,
};
use serde_json::{json, Value};

fn fixtures_path() -> &'static Path {
    Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

fn validator() -> ContractValidator {
    ContractValidator::new().unwrap()
}

// =============================================================================
// Garden Contract
// =============================================================================

#[test]
fn test_minimal_record_with_empty_yields_validates() {
    let report = validator().validate_garden(&json!({
        "sqft": 200,
        "greywater": 15,
        "rainwater": 40,
        "yields": []
    }));
    assert!(report.is_valid(), "violations: {:?}", report.violations);
}

#[test]
fn test_missing_rainwater_cites_the_field() {
    let report = validator().validate_garden(&json!({
        "sqft": 200,
        "greywater": 15,
        "yields": []
    }));
    assert_eq!(report.missing_fields(), vec!["rainwater"]);
    assert!(matches!(
        report.violations[0].kind,
        ViolationKind::MissingField { ref field } if field == "rainwater"
    ));
}

#[test]
fn test_yield_entry_requires_min_yield() {
    let base = |entry: Value| {
        json!({
            "sqft": 200,
            "greywater": 15,
            "rainwater": 40,
            "yields": [entry]
        })
    };

    let ok = validator().validate_garden(&base(json!({"plant": "tomato", "min_yield": 5})));
    assert!(ok.is_valid());

    let missing = validator().validate_garden(&base(json!({"plant": "tomato"})));
    assert_eq!(missing.missing_fields(), vec!["yields[0].min_yield"]);
}

#[test]
fn test_string_min_yield_fails_type_validation() {
    let report = validator().validate_garden(&json!({
        "sqft": 200,
        "greywater": 15,
        "rainwater": 40,
        "yields": [{"plant": "tomato", "min_yield": "5"}]
    }));

    assert_eq!(report.violations.len(), 1);
    assert_eq!(report.violations[0].path, "yields[0].min_yield");
    assert_eq!(
        report.violations[0].kind,
        ViolationKind::WrongType {
            expected: "number".to_string(),
            actual: "string".to_string(),
        }
    );
}

#[test]
fn test_weeks_is_optional() {
    let report = validator().validate_garden(&json!({
        "sqft": 200,
        "greywater": 15,
        "rainwater": 40,
        "yields": [{"plant": "tomato", "min_yield": 5}]
    }));
    assert!(report.is_valid());
}

#[test]
fn test_permissive_yield_bounds_are_not_rejected() {
    // The contract deliberately does not relate max_yield to min_yield,
    // bound max_yield_pct, or reject negative areas.
    let report = validator().validate_garden(&json!({
        "sqft": -10,
        "greywater": 15,
        "rainwater": 40,
        "yields": [{"plant": "tomato", "min_yield": 5, "max_yield": 1, "max_yield_pct": 300}]
    }));
    assert!(report.is_valid());
}

#[test]
fn test_round_trip_preserves_everything() {
    let source: Value =
        serde_json::from_str(include_str!("fixtures/garden.json")).unwrap();

    let record: GardenRecord = validator().check_garden(&source).unwrap();
    let back = serde_json::to_value(&record).unwrap();

    // Revalidates cleanly and is value-identical, yield order included
    assert!(validator().validate_garden(&back).is_valid());
    assert_eq!(back, source);

    let order: Vec<_> = record.yields.iter().map(|y| y.plant.as_str()).collect();
    assert_eq!(order, vec!["carrot", "tomato", "clover"]);
}

// =============================================================================
// Plant Contract & Catalog
// =============================================================================

#[test]
fn test_plant_fixtures_validate() {
    let validator = validator();
    for name in ["tomato", "carrot", "clover"] {
        let path = fixtures_path().join("plants").join(format!("{}.json", name));
        let instance: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let report = validator.validate_plant(&instance);
        assert!(report.is_valid(), "{}: {:?}", name, report.violations);
    }
}

#[test]
fn test_garden_loads_from_fixtures() {
    let validator = validator();
    let garden = Garden::load_dir(
        &validator,
        fixtures_path().join("garden.json"),
        fixtures_path().join("plants"),
    )
    .unwrap();

    assert_eq!(garden.record.weeks, Some(20));
    assert_eq!(
        garden.catalog.base_names(),
        vec!["carrot", "clover", "tomato"]
    );
    // tomato lists carrot as a companion, so the catalog derives the pairing
    assert!(garden.catalog.get("tomato-carrot").is_ok());
    assert!(garden.unknown_yield_targets().is_empty());
}

#[test]
fn test_companion_share_counts_toward_target() {
    let validator = validator();
    let garden = Garden::load_dir(
        &validator,
        fixtures_path().join("garden.json"),
        fixtures_path().join("plants"),
    )
    .unwrap();

    let carrot_yields = garden.catalog.target_yields("carrot");
    assert_eq!(carrot_yields["carrot"], 0.8);
    // carrot (lifespan 6) is replanted twice inside tomato's 12 weeks
    assert_eq!(carrot_yields["tomato-carrot"], 1.6);
}

#[test]
fn test_invalid_garden_reports_every_violation() {
    let err = validator()
        .check_garden(&json!({
            "greywater": "lots",
            "yields": [{"plant": 7}]
        }))
        .unwrap_err();

    let report = match err {
        GardenError::Invalid { report, .. } => report,
        other => panic!("expected Invalid, got {:?}", other),
    };

    // missing sqft + rainwater, wrong-typed greywater and plant,
    // missing min_yield: all surfaced together
    let mut missing = report.missing_fields();
    missing.sort();
    assert_eq!(missing, vec!["rainwater", "sqft", "yields[0].min_yield"]);
    let type_errors = report
        .violations
        .iter()
        .filter(|v| matches!(v.kind, ViolationKind::WrongType { .. }))
        .count();
    assert_eq!(type_errors, 2);
}
