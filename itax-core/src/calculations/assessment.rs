//! Tax on a given taxable income under one regime.
//!
//! Runs the back half of the pipeline: slab tax, Section 87A, surcharge with
//! marginal relief, cess, and statutory rounding of the final liability.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::cess::cess;
use crate::calculations::common::round_to_ten;
use crate::calculations::rebate::{Rebate, apply_rebate};
use crate::calculations::slabs::slab_tax;
use crate::calculations::surcharge::{Surcharge, apply_surcharge};
use crate::models::{Regime, SlabEntry, TaxRules};

/// Liability for one regime on an already rounded taxable income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub regime: Regime,
    pub taxable_income: Decimal,
    pub base_tax: Decimal,
    pub slab_breakdown: Vec<SlabEntry>,
    pub rebate: Rebate,
    pub surcharge: Surcharge,
    pub cess: Decimal,
    pub total_tax: Decimal,
}

impl Assessment {
    /// Rebate marginal relief plus surcharge marginal relief.
    pub fn marginal_relief(&self) -> Decimal {
        self.rebate.marginal_relief + self.surcharge.marginal_relief
    }
}

/// Assesses `taxable_income` under `regime`.
///
/// `age` only matters for the old regime's exemption limit.
pub fn assess(
    regime: Regime,
    taxable_income: Decimal,
    age: u32,
    rules: &TaxRules,
) -> Assessment {
    let slabs = slab_tax(regime, taxable_income, age, rules);
    let rebate = apply_rebate(regime, taxable_income, slabs.base_tax, rules);
    let surcharge = apply_surcharge(
        regime,
        taxable_income,
        rebate.tax_after_rebate,
        age,
        rules,
    );
    let cess = cess(
        rebate.tax_after_rebate,
        surcharge.surcharge,
        surcharge.marginal_relief,
        rules,
    );
    let total_tax = round_to_ten(
        rebate.tax_after_rebate + surcharge.surcharge - surcharge.marginal_relief + cess,
    );

    debug!(
        regime = regime.as_str(),
        taxable_income = %taxable_income,
        base_tax = %slabs.base_tax,
        tax_after_rebate = %rebate.tax_after_rebate,
        total_tax = %total_tax,
        "Regime assessed"
    );

    Assessment {
        regime,
        taxable_income,
        base_tax: slabs.base_tax,
        slab_breakdown: slabs.breakdown,
        rebate,
        surcharge,
        cess,
        total_tax,
    }
}
