//! CSV loader for batch taxpayer comparisons.
//!
//! ## CSV Format
//!
//! One taxpayer per row. Headers are matched by name, so column order does
//! not matter, and every column is optional: a missing column or an empty
//! cell takes the value from [`TaxpayerInput::default`]. Surrounding
//! whitespace is trimmed.
//!
//! | Column                                  | Type    | Notes                                   |
//! |-----------------------------------------|---------|-----------------------------------------|
//! | `label`                                 | string  | Shown in the report, e.g. an employee ID |
//! | `age`, `father_age`, `mother_age`       | integer | Parent ages may be left empty           |
//! | `is_metro`, `is_government_employee`, `is_self_occupied` | boolean | `true/false`, `yes/no`, `1/0` |
//! | `rent_frequency`                        | string  | `monthly` (default) or `annual`         |
//! | every other column                      | amount  | `1200000`, `12,00,000` or `1,200,000`   |
//!
//! Amount columns: `basic_salary`, `dearness_allowance`, `special_allowance`,
//! `leave_encashment`, `bonus`, `perquisites`, `hra_received`, `rent_paid`,
//! `home_loan_interest`, `rental_income`, `lta_received`, `lta_spent`,
//! `savings_interest`, `fixed_deposit_interest`, `professional_tax`,
//! `section_80c`, `section_80ccd_1b`, `section_80ccd_2`,
//! `health_insurance_self`, `health_insurance_parents`, `preventive_checkup`,
//! `section_80e`.
//!
//! Custom allowances, custom deductions and 80G donations are lists and are
//! only accepted from TOML or JSON input files.
//!
//! ### Example
//!
//! ```csv
//! label,age,basic_salary,hra_received,rent_paid,section_80c
//! EMP-001,30,"12,00,000",,,
//! EMP-002,45,900000,360000,25000,150000
//! ```
use std::path::Path;

use itax_core::{RentFrequency, TaxpayerInput};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::{ParseAmountError, parse_amount, parse_bool};

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    label: Option<String>,
    age: Option<String>,
    father_age: Option<String>,
    mother_age: Option<String>,
    is_metro: Option<String>,
    is_government_employee: Option<String>,
    basic_salary: Option<String>,
    dearness_allowance: Option<String>,
    special_allowance: Option<String>,
    leave_encashment: Option<String>,
    bonus: Option<String>,
    perquisites: Option<String>,
    hra_received: Option<String>,
    rent_paid: Option<String>,
    rent_frequency: Option<String>,
    home_loan_interest: Option<String>,
    is_self_occupied: Option<String>,
    rental_income: Option<String>,
    lta_received: Option<String>,
    lta_spent: Option<String>,
    savings_interest: Option<String>,
    fixed_deposit_interest: Option<String>,
    professional_tax: Option<String>,
    section_80c: Option<String>,
    section_80ccd_1b: Option<String>,
    section_80ccd_2: Option<String>,
    health_insurance_self: Option<String>,
    health_insurance_parents: Option<String>,
    preventive_checkup: Option<String>,
    section_80e: Option<String>,
}

/// One parsed CSV row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxpayerRecord {
    /// 1-based data row number (the header is row 0).
    pub row: usize,
    pub label: Option<String>,
    pub input: TaxpayerInput,
}

// ---------------------------------------------------------------------------
// Public error type
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read CSV file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying CSV reader failed (bad quoting, ragged row, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("invalid amount in column '{column}' on row {row}: {source}")]
    InvalidAmount {
        column: &'static str,
        row: usize,
        #[source]
        source: ParseAmountError,
    },

    #[error("invalid {kind} '{value}' in column '{column}' on row {row}")]
    InvalidValue {
        kind: &'static str,
        column: &'static str,
        value: String,
        row: usize,
    },
}

// ---------------------------------------------------------------------------
// Cell conversion
// ---------------------------------------------------------------------------

/// Returns the cell text, or `None` when the cell is absent or blank.
fn cell(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn amount(
    value: &Option<String>,
    column: &'static str,
    row: usize,
) -> Result<Decimal, CsvLoadError> {
    let Some(text) = cell(value) else {
        return Ok(Decimal::ZERO);
    };
    parse_amount(text).map_err(|source| CsvLoadError::InvalidAmount {
        column,
        row,
        source,
    })
}

fn flag(
    value: &Option<String>,
    column: &'static str,
    row: usize,
    default: bool,
) -> Result<bool, CsvLoadError> {
    let Some(text) = cell(value) else {
        return Ok(default);
    };
    parse_bool(text).ok_or_else(|| CsvLoadError::InvalidValue {
        kind: "boolean",
        column,
        value: text.to_string(),
        row,
    })
}

fn age(
    value: &Option<String>,
    column: &'static str,
    row: usize,
) -> Result<Option<u32>, CsvLoadError> {
    let Some(text) = cell(value) else {
        return Ok(None);
    };
    text.parse()
        .map(Some)
        .map_err(|_| CsvLoadError::InvalidValue {
            kind: "age",
            column,
            value: text.to_string(),
            row,
        })
}

fn rent_frequency(
    value: &Option<String>,
    row: usize,
) -> Result<RentFrequency, CsvLoadError> {
    let Some(text) = cell(value) else {
        return Ok(RentFrequency::default());
    };
    RentFrequency::parse(text).ok_or_else(|| CsvLoadError::InvalidValue {
        kind: "rent frequency",
        column: "rent_frequency",
        value: text.to_string(),
        row,
    })
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into a [`TaxpayerRecord`].
///
/// `row` is 1-based (for error messages).
fn convert_row(
    r: CsvRow,
    row: usize,
) -> Result<TaxpayerRecord, CsvLoadError> {
    let defaults = TaxpayerInput::default();

    let input = TaxpayerInput {
        age: age(&r.age, "age", row)?.unwrap_or(defaults.age),
        father_age: age(&r.father_age, "father_age", row)?,
        mother_age: age(&r.mother_age, "mother_age", row)?,
        is_metro: flag(&r.is_metro, "is_metro", row, defaults.is_metro)?,
        is_government_employee: flag(
            &r.is_government_employee,
            "is_government_employee",
            row,
            defaults.is_government_employee,
        )?,
        basic_salary: amount(&r.basic_salary, "basic_salary", row)?,
        dearness_allowance: amount(&r.dearness_allowance, "dearness_allowance", row)?,
        special_allowance: amount(&r.special_allowance, "special_allowance", row)?,
        leave_encashment: amount(&r.leave_encashment, "leave_encashment", row)?,
        bonus: amount(&r.bonus, "bonus", row)?,
        perquisites: amount(&r.perquisites, "perquisites", row)?,
        hra_received: amount(&r.hra_received, "hra_received", row)?,
        rent_paid: amount(&r.rent_paid, "rent_paid", row)?,
        rent_frequency: rent_frequency(&r.rent_frequency, row)?,
        home_loan_interest: amount(&r.home_loan_interest, "home_loan_interest", row)?,
        is_self_occupied: flag(
            &r.is_self_occupied,
            "is_self_occupied",
            row,
            defaults.is_self_occupied,
        )?,
        rental_income: amount(&r.rental_income, "rental_income", row)?,
        lta_received: amount(&r.lta_received, "lta_received", row)?,
        lta_spent: amount(&r.lta_spent, "lta_spent", row)?,
        savings_interest: amount(&r.savings_interest, "savings_interest", row)?,
        fixed_deposit_interest: amount(&r.fixed_deposit_interest, "fixed_deposit_interest", row)?,
        professional_tax: amount(&r.professional_tax, "professional_tax", row)?,
        section_80c: amount(&r.section_80c, "section_80c", row)?,
        section_80ccd_1b: amount(&r.section_80ccd_1b, "section_80ccd_1b", row)?,
        section_80ccd_2: amount(&r.section_80ccd_2, "section_80ccd_2", row)?,
        health_insurance_self: amount(&r.health_insurance_self, "health_insurance_self", row)?,
        health_insurance_parents: amount(
            &r.health_insurance_parents,
            "health_insurance_parents",
            row,
        )?,
        preventive_checkup: amount(&r.preventive_checkup, "preventive_checkup", row)?,
        section_80e: amount(&r.section_80e, "section_80e", row)?,
        ..defaults
    };

    Ok(TaxpayerRecord {
        row,
        label: cell(&r.label).map(str::to_string),
        input,
    })
}

/// Parse CSV text and return one [`TaxpayerRecord`] per data row, in file
/// order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid.
/// * [`CsvLoadError::InvalidAmount`] or [`CsvLoadError::InvalidValue`] if a
///   cell cannot be converted; the error names the column and row.
pub fn load_from_str(input: &str) -> Result<Vec<TaxpayerRecord>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Convenience wrapper: read a file from disk and delegate to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<TaxpayerRecord>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
