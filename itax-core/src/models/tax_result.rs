use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The two mutually exclusive personal income-tax schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Regime {
    Old,
    New,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "OLD",
            Self::New => "NEW",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Old => write!(f, "Old regime"),
            Self::New => write!(f, "New regime"),
        }
    }
}

/// One row of a slab-wise tax breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabEntry {
    /// Human-readable income band, e.g. `₹4L - ₹8L`.
    pub label: String,
    /// Marginal rate as a fraction.
    pub rate: Decimal,
    /// Tax attributable to the portion of income inside this band.
    pub tax: Decimal,
}

/// Full computation for one regime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub regime: Regime,

    pub gross_total_income: Decimal,
    pub standard_deduction: Decimal,
    /// All deductions and exemptions, standard deduction included.
    pub total_deductions: Decimal,
    /// Gross income less deductions, floored at zero, before rounding.
    pub net_taxable_income: Decimal,
    /// Taxable income rounded to the nearest ten, used for the slabs.
    pub rounded_taxable_income: Decimal,

    /// Slab tax before any rebate.
    pub base_tax: Decimal,
    /// Full Section 87A rebate.
    pub rebate: Decimal,
    /// Section 87A marginal relief (new regime only).
    pub rebate_marginal_relief: Decimal,
    /// Surcharge before marginal relief.
    pub surcharge: Decimal,
    /// Marginal relief on surcharge.
    pub surcharge_marginal_relief: Decimal,
    /// Sum of both marginal reliefs.
    pub marginal_relief: Decimal,
    pub cess: Decimal,
    /// Final liability, rounded to the nearest ten.
    pub total_tax: Decimal,
    /// Total tax as a percentage of gross total income.
    pub effective_rate: Decimal,

    pub slab_breakdown: Vec<SlabEntry>,
}
