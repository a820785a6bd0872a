// Integration tests for GearCase Algo

use gearcase_algo::core::{CompatibilityEngine, EngineConfig, RankOptions};
use gearcase_algo::models::{CaseItem, Dimensions, GearItem, ProtectionLevel, ScoringWeights, Weight, WeightClass};
use gearcase_algo::services::Catalog;

fn create_test_gear(id: &str, dims: (f64, f64, f64), weight_kg: f64, category: &str) -> GearItem {
    GearItem {
        id: id.to_string(),
        name: Some(format!("Gear {}", id)),
        dimensions: Some(Dimensions::new(dims.0, dims.1, dims.2, "cm")),
        weight: Some(Weight::new(weight_kg, "kg")),
        category: category.to_string(),
        brand: "Roland".to_string(),
        gear_type: String::new(),
    }
}

fn create_test_case(id: &str, interior: (f64, f64, f64), max_kg: f64, level: ProtectionLevel) -> CaseItem {
    CaseItem {
        id: id.to_string(),
        name: Some(format!("Case {}", id)),
        interior_dimensions: Some(Dimensions::new(interior.0, interior.1, interior.2, "cm")),
        max_weight: Some(Weight::new(max_kg, "kg")),
        weight_class: None,
        protection_level: Some(level),
        waterproof: false,
        shockproof: false,
        dustproof: false,
        crushproof: false,
        case_type: "Hard".to_string(),
        brand: Some("Gator".to_string()),
        compatible_with: vec![],
    }
}

#[test]
fn test_integration_end_to_end_ranking() {
    let engine = CompatibilityEngine::with_default_config();
    let gear = create_test_gear("synth", (50.0, 30.0, 15.0), 2.8, "Synthesizer");

    let mut waterproof = create_test_case("waterproof", (52.0, 32.0, 17.0), 5.0, ProtectionLevel::High);
    waterproof.waterproof = true;
    waterproof.shockproof = true;

    let mut branded = create_test_case("branded", (56.0, 34.0, 18.0), 10.0, ProtectionLevel::Medium);
    branded.brand = Some("Roland".to_string());

    let mut broken = create_test_case("broken", (52.0, 32.0, 17.0), 5.0, ProtectionLevel::High);
    broken.interior_dimensions = Some(Dimensions::new(52.0, -1.0, 17.0, "cm"));

    let candidates = vec![
        create_test_case("tiny", (28.0, 8.0, 18.0), 5.0, ProtectionLevel::High), // Does not fit
        waterproof,
        create_test_case("flimsy", (52.0, 32.0, 17.0), 2.0, ProtectionLevel::High), // Too weak
        branded,
        broken,
        create_test_case("plain", (60.0, 40.0, 25.0), 10.0, ProtectionLevel::Low),
    ];

    let ranked = engine.rank_candidates(&gear, &candidates, &RankOptions::default()).unwrap();

    assert_eq!(ranked.total_candidates, 6);
    assert_eq!(ranked.rejected.len(), 1);
    assert_eq!(ranked.rejected[0].field, "interiorDimensions.width");

    let ids: Vec<&str> = ranked.matches.iter().map(|m| m.case_id.as_str()).collect();
    assert_eq!(ids.len(), 3);
    assert!(!ids.contains(&"tiny"));
    assert!(!ids.contains(&"flimsy"));

    for pair in ranked.matches.windows(2) {
        assert!(pair[0].compatibility_score >= pair[1].compatibility_score);
    }
    for m in &ranked.matches {
        assert!(m.compatibility_score > 0);
        assert!(m.compatibility_score <= 100);
    }
}

#[test]
fn test_integration_snug_hard_case_scores() {
    let engine = CompatibilityEngine::with_default_config();
    let gear = create_test_gear("synth", (50.0, 30.0, 15.0), 2.8, "Guitar Pedalboard");
    let mut case = create_test_case("hard", (52.0, 32.0, 17.0), 5.0, ProtectionLevel::High);
    case.waterproof = true;
    case.shockproof = true;

    let result = engine.score_match(&gear, &case).unwrap();

    assert!((50..=100).contains(&result.dimension_score));
    assert_eq!(result.dimension_score, 86);
    assert_eq!(result.protection_score, 85);
    assert_eq!(result.brand_score, 50);
    let expected = (0.6 * result.dimension_score as f64 + 0.3 * 85.0 + 0.1 * 50.0).round() as u8;
    assert_eq!(result.compatibility_score, expected);
    assert_eq!(result.compatibility_score, 82);
}

#[test]
fn test_integration_include_infeasible_for_diagnostics() {
    let engine = CompatibilityEngine::with_default_config();
    let gear = create_test_gear("keys", (60.0, 16.0, 35.0), 4.0, "Keyboard");
    let candidates = vec![
        create_test_case("small", (28.0, 8.0, 18.0), 10.0, ProtectionLevel::High),
        create_test_case("large", (70.0, 20.0, 40.0), 10.0, ProtectionLevel::High),
    ];

    let options = RankOptions { include_infeasible: true, limit: None };
    let ranked = engine.rank_candidates(&gear, &candidates, &options).unwrap();

    assert_eq!(ranked.matches.len(), 2);
    assert_eq!(ranked.matches[0].case_id, "large");
    assert_eq!(ranked.matches[1].case_id, "small");
    assert_eq!(ranked.matches[1].compatibility_score, 0);
    assert!(!ranked.matches[1].is_feasible());
}

#[test]
fn test_integration_weight_class_capacity() {
    let engine = CompatibilityEngine::with_default_config();
    let gear = create_test_gear("amp", (40.0, 20.0, 30.0), 12.0, "Amplifier");

    let mut light = create_test_case("light", (45.0, 25.0, 35.0), 0.0, ProtectionLevel::High);
    light.max_weight = None;
    light.weight_class = Some(WeightClass::Light);

    let mut medium = light.clone();
    medium.id = "medium".to_string();
    medium.weight_class = Some(WeightClass::Medium);

    let ranked = engine
        .rank_candidates(&gear, &[light, medium], &RankOptions::default())
        .unwrap();

    assert_eq!(ranked.matches.len(), 1);
    assert_eq!(ranked.matches[0].case_id, "medium");
}

#[test]
fn test_integration_custom_weight_profile() {
    let fit_only = EngineConfig {
        weights: ScoringWeights { dimension: 1.0, protection: 0.0, brand: 0.0 },
        ..EngineConfig::default()
    };
    let engine = CompatibilityEngine::new(fit_only);
    let gear = create_test_gear("synth", (50.0, 30.0, 15.0), 2.8, "Synthesizer");
    let case = create_test_case("hard", (52.0, 32.0, 17.0), 5.0, ProtectionLevel::Low);

    let result = engine.score_match(&gear, &case).unwrap();
    assert_eq!(result.compatibility_score, result.dimension_score);
}

#[test]
fn test_integration_catalog_json_round_trip_through_engine() {
    let raw = r#"{
        "gear": [
            {"id": "sm7b", "dimensions": {"length": 7.82, "width": 4.93, "height": 3.96, "unit": "in"},
             "weight": {"value": 1.69, "unit": "lb"}, "category": "Microphones", "brand": "Shure"}
        ],
        "cases": [
            {"id": "pelican-1200", "interiorDimensions": {"length": 9.25, "width": 7.12, "height": 4.12, "unit": "in"},
             "maxWeight": {"value": 10, "unit": "lb"}, "protectionLevel": "high", "waterproof": true,
             "shockproof": true, "type": "Hard", "brand": "Pelican"},
            {"id": "gig-bag", "interiorDimensions": {"length": 25, "width": 15, "height": 12, "unit": "cm"},
             "weightClass": "light", "protectionLevel": "low", "type": "Soft", "compatibleWith": ["microphone"]}
        ]
    }"#;

    let catalog: Catalog = serde_json::from_str(raw).unwrap();
    let engine = CompatibilityEngine::with_default_config();
    let gear = catalog.gear("sm7b").unwrap();

    let ranked = engine.rank_candidates(gear, &catalog.cases, &RankOptions::default()).unwrap();

    assert_eq!(ranked.matches.len(), 2);
    assert_eq!(ranked.matches[0].case_id, "pelican-1200");
    // 50 + 10 + 10 + 15 + 10 (fragile gear, hard case)
    assert_eq!(ranked.matches[0].protection_score, 95);
    // 50 - 10 - 5 (fragile gear, soft case)
    assert_eq!(ranked.matches[1].protection_score, 35);
    assert_eq!(ranked.matches[1].brand_score, 80);
}

#[test]
fn test_integration_non_numeric_weight_rejects_only_that_case() {
    let raw = r#"{
        "gear": [
            {"id": "sm58", "dimensions": {"length": 16, "width": 5, "height": 5}, "weight": {"value": 298, "unit": "g"},
             "category": "Microphone", "brand": "Shure"}
        ],
        "cases": [
            {"id": "mic-box", "interiorDimensions": {"length": 20, "width": 8, "height": 8},
             "maxWeight": {"value": 2}, "protectionLevel": "medium", "type": "Hard"},
            {"id": "heavy-box", "interiorDimensions": {"length": 20, "width": 8, "height": 8},
             "maxWeight": {"value": "heavy"}, "protectionLevel": "medium", "type": "Hard"},
            {"id": "armored", "interiorDimensions": {"length": 20, "width": 8, "height": 8},
             "maxWeight": {"value": 2}, "protectionLevel": "extreme", "type": "Hard"}
        ]
    }"#;

    let catalog: Catalog = serde_json::from_str(raw).unwrap();
    let engine = CompatibilityEngine::with_default_config();
    let gear = catalog.gear("sm58").unwrap();

    let ranked = engine.rank_candidates(gear, &catalog.cases, &RankOptions::default()).unwrap();
    assert_eq!(ranked.matches.len(), 1);
    assert_eq!(ranked.matches[0].case_id, "mic-box");

    let rejected: Vec<_> = catalog.rejected_cases().collect();
    assert_eq!(rejected.len(), 2);
    assert_eq!(rejected[0].item_id, "heavy-box");
    assert_eq!(rejected[0].field, "maxWeight.value");
    assert_eq!(rejected[1].item_id, "armored");
    assert_eq!(rejected[1].field, "protectionLevel");
}
