//! Loading taxpayer input and rule overrides from TOML or JSON files.

use std::path::Path;

use itax_core::{TaxCalculator, TaxRules, TaxRulesError, TaxpayerInput};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

/// Serialization format of an input file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Toml,
    Json,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Errors that can occur while loading an input or rules file.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported input file '{path}', expected a .toml or .json extension")]
    UnsupportedFormat { path: String },

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tax rules: {0}")]
    Rules(#[from] TaxRulesError),
}

/// Deserializes `contents` in the given format.
pub fn parse_str<T: DeserializeOwned>(
    contents: &str,
    format: InputFormat,
) -> Result<T, InputError> {
    match format {
        InputFormat::Toml => Ok(toml::from_str(contents)?),
        InputFormat::Json => Ok(serde_json::from_str(contents)?),
    }
}

fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let format = InputFormat::from_path(path).ok_or_else(|| InputError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;
    let contents = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    debug!(path = %path.display(), ?format, "Loading input file");
    parse_str(&contents, format)
}

/// Loads one taxpayer from a `.toml` or `.json` file.
///
/// Fields left out of the file keep their [`TaxpayerInput::default`] values.
pub fn load_taxpayer(path: &Path) -> Result<TaxpayerInput, InputError> {
    load_file(path)
}

/// Loads rule overrides from a `.toml` or `.json` file and validates them.
///
/// Fields left out of the file keep their FY 2025-26 defaults.
pub fn load_rules(path: &Path) -> Result<TaxRules, InputError> {
    let rules: TaxRules = load_file(path)?;
    rules.validate()?;
    Ok(rules)
}

/// Builds a calculator from an optional rules file.
pub fn build_calculator(rules_path: Option<&Path>) -> Result<TaxCalculator, InputError> {
    match rules_path {
        Some(path) => Ok(TaxCalculator::new(load_rules(path)?)?),
        None => Ok(TaxCalculator::default()),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use itax_core::{DonationBlock, RentFrequency};

    use super::*;

    #[test]
    fn format_is_chosen_by_extension() {
        assert_eq!(
            InputFormat::from_path(Path::new("a/taxpayer.toml")),
            Some(InputFormat::Toml)
        );
        assert_eq!(
            InputFormat::from_path(Path::new("taxpayer.JSON")),
            Some(InputFormat::Json)
        );
        assert_eq!(InputFormat::from_path(Path::new("taxpayer.yaml")), None);
        assert_eq!(InputFormat::from_path(Path::new("taxpayer")), None);
    }

    #[test]
    fn toml_taxpayer_with_lists() {
        let toml = r#"
age = 35
basic_salary = 1200000
rent_paid = 300000
rent_frequency = "annual"
is_metro = false

[[donations]]
id = "d1"
fund_name = "Local trust"
amount = 20000
block = 3

[[custom_deductions]]
id = "c1"
name = "Agniveer corpus"
amount = 5000
"#;

        let input: TaxpayerInput = parse_str(toml, InputFormat::Toml).expect("valid TOML");

        assert_eq!(input.age, 35);
        assert_eq!(input.basic_salary, dec!(1200000));
        assert_eq!(input.rent_frequency, RentFrequency::Annual);
        assert!(!input.is_metro);
        assert!(input.is_self_occupied);
        assert_eq!(input.donations[0].block, DonationBlock::FullLimited);
        assert_eq!(input.custom_deductions[0].amount, dec!(5000));
    }

    #[test]
    fn json_taxpayer_accepts_string_amounts() {
        let json = r#"{ "age": 62, "basic_salary": "850000.50", "father_age": 90 }"#;

        let input: TaxpayerInput = parse_str(json, InputFormat::Json).expect("valid JSON");

        assert_eq!(input.age, 62);
        assert_eq!(input.basic_salary, dec!(850000.50));
        assert_eq!(input.father_age, Some(90));
    }

    #[test]
    fn invalid_donation_block_is_rejected() {
        let json = r#"{ "donations": [{ "id": "x", "amount": 100, "block": 7 }] }"#;

        let result: Result<TaxpayerInput, _> = parse_str(json, InputFormat::Json);

        assert!(matches!(result, Err(InputError::Json(_))));
    }

    #[test]
    fn rules_override_keeps_other_defaults() {
        let toml = "standard_deduction_new = 50000\ncess_rate = 0.05\n";

        let rules: TaxRules = parse_str(toml, InputFormat::Toml).expect("valid TOML");

        assert_eq!(rules.standard_deduction_new, dec!(50000));
        assert_eq!(rules.cess_rate, dec!(0.05));
        assert_eq!(rules.section_80c_limit, dec!(150000));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let result = load_taxpayer(Path::new("taxpayer.yaml"));

        assert!(matches!(result, Err(InputError::UnsupportedFormat { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = load_rules(Path::new("no/such/rules.toml"));

        assert!(matches!(result, Err(InputError::Io { .. })));
    }

    #[test]
    fn default_calculator_without_rules_file() {
        let calculator = build_calculator(None).expect("defaults are valid");

        assert_eq!(calculator.rules(), &TaxRules::default());
    }
}
