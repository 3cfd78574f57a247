//! Integration tests for loading taxpayers and rule overrides from fixture
//! files.

use std::path::PathBuf;

use itax_cli::input::{self, InputError};
use itax_core::{DonationBlock, Regime, TaxRulesError};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_toml_taxpayer_end_to_end() {
    let taxpayer = input::load_taxpayer(&fixture("taxpayer.toml")).expect("fixture should load");
    let calculator = input::build_calculator(None).unwrap();

    let result = calculator.calculate(&taxpayer);

    assert_eq!(taxpayer.custom_allowances.len(), 1);
    assert_eq!(taxpayer.donations[0].block, DonationBlock::FullUnlimited);
    assert_eq!(result.old_regime.total_tax, dec!(117280));
    assert_eq!(result.new_regime.total_tax, dec!(171270));
    assert_eq!(result.recommendation, Regime::Old);
    assert_eq!(result.savings, dec!(53990));
}

#[test]
fn test_json_taxpayer_end_to_end() {
    let taxpayer = input::load_taxpayer(&fixture("taxpayer.json")).expect("fixture should load");
    let calculator = input::build_calculator(None).unwrap();

    let result = calculator.calculate(&taxpayer);

    assert_eq!(result.old_regime.total_tax, dec!(163800));
    assert_eq!(result.new_regime.total_tax, dec!(0));
}

#[test]
fn test_rules_override_changes_rebate() {
    let taxpayer = input::load_taxpayer(&fixture("taxpayer.json")).unwrap();
    let calculator = input::build_calculator(Some(&fixture("rules.toml")))
        .expect("rules fixture should be valid");

    let result = calculator.calculate(&taxpayer);

    assert_eq!(calculator.rules().new_rebate_limit, dec!(700000));
    // 1125000 taxable, no rebate: 52500 + 2100 cess
    assert_eq!(result.new_regime.rebate, dec!(0));
    assert_eq!(result.new_regime.total_tax, dec!(54600));
    assert_eq!(result.savings, dec!(109200));
}

#[test]
fn test_invalid_rules_are_rejected() {
    let error = input::build_calculator(Some(&fixture("invalid_rules.toml"))).unwrap_err();

    match error {
        InputError::Rules(TaxRulesError::InvalidRate { name, value }) => {
            assert_eq!(name, "cess_rate");
            assert_eq!(value, dec!(1.5));
        }
        other => panic!("expected InvalidRate, got {:?}", other),
    }
}

#[test]
fn test_comparison_serializes_to_json() {
    let taxpayer = input::load_taxpayer(&fixture("taxpayer.json")).unwrap();
    let result = input::build_calculator(None).unwrap().calculate(&taxpayer);

    let json: serde_json::Value = serde_json::to_value(&result).unwrap();

    assert_eq!(json["recommendation"], "NEW");
    assert_eq!(json["old_regime"]["regime"], "OLD");
    assert_eq!(json["old_regime"]["total_tax"], "163800");
}
