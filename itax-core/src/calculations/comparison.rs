//! Old versus new regime comparison.
//!
//! [`TaxCalculator`] ties the stages together:
//!
//! | Stage       | Module                                     |
//! |-------------|--------------------------------------------|
//! | Income      | [`income`](crate::calculations::income)         |
//! | Exemptions  | [`exemptions`](crate::calculations::exemptions) |
//! | Deductions  | [`deductions`](crate::calculations::deductions) |
//! | Slab tax    | [`slabs`](crate::calculations::slabs)           |
//! | Rebate      | [`rebate`](crate::calculations::rebate)         |
//! | Surcharge   | [`surcharge`](crate::calculations::surcharge)   |
//! | Cess        | [`cess`](crate::calculations::cess)             |
//!
//! Every stage is a pure function, so the same input always produces the same
//! result.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use itax_core::{Regime, TaxpayerInput, calculate};
//!
//! let input = TaxpayerInput {
//!     age: 30,
//!     basic_salary: dec!(1200000),
//!     ..TaxpayerInput::default()
//! };
//!
//! let result = calculate(&input);
//!
//! assert_eq!(result.new_regime.total_tax, dec!(0));
//! assert_eq!(result.old_regime.total_tax, dec!(163800));
//! assert_eq!(result.recommendation, Regime::New);
//! assert_eq!(result.savings, dec!(163800));
//! ```

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::assessment::{Assessment, assess};
use crate::calculations::common::{non_negative, percentage_of, round_to_ten};
use crate::calculations::deductions::{
    new_regime_deductions, old_regime_deductions, section_80ccd_breakdown,
};
use crate::calculations::exemptions::{hra_exemption, lta_exemption};
use crate::calculations::income::aggregate_income;
use crate::models::{
    ComparisonResult, Regime, TaxResult, TaxRules, TaxRulesError, TaxpayerInput,
};

/// Calculator for both regimes under one set of [`TaxRules`].
#[derive(Debug, Clone, Default)]
pub struct TaxCalculator {
    rules: TaxRules,
}

impl TaxCalculator {
    /// Creates a calculator after validating `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxRulesError`] if any rate, limit or band in `rules` is
    /// invalid.
    pub fn new(rules: TaxRules) -> Result<Self, TaxRulesError> {
        if let Err(error) = rules.validate() {
            warn!(%error, "Rejected tax rules");
            return Err(error);
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &TaxRules {
        &self.rules
    }

    /// Computes tax under both regimes and recommends the cheaper one.
    ///
    /// Negative amounts in `input` are treated as zero. The new regime wins
    /// ties.
    pub fn calculate(
        &self,
        input: &TaxpayerInput,
    ) -> ComparisonResult {
        let input = input.clamped();
        let rules = &self.rules;

        let income = aggregate_income(&input, rules);
        let hra = hra_exemption(&input, rules);
        let lta = lta_exemption(&input);
        debug!(
            salary_income = %income.salary_income,
            gross_old = %income.gross_total_income_old,
            gross_new = %income.gross_total_income_new,
            hra_exemption = %hra.exemption,
            lta_exemption = %lta,
            "Income aggregated"
        );

        let old_deductions = old_regime_deductions(&input, &income, hra.exemption, lta, rules);
        let new_deductions = new_regime_deductions(&input, &income, rules);

        let old_regime = self.regime_result(
            Regime::Old,
            input.age,
            income.gross_total_income_old,
            old_deductions.standard_deduction,
            old_deductions.total,
        );
        let new_regime = self.regime_result(
            Regime::New,
            input.age,
            income.gross_total_income_new,
            new_deductions.standard_deduction,
            new_deductions.total,
        );

        let recommendation = if new_regime.total_tax <= old_regime.total_tax {
            Regime::New
        } else {
            Regime::Old
        };
        let savings = (new_regime.total_tax - old_regime.total_tax).abs();
        debug!(
            old_total = %old_regime.total_tax,
            new_total = %new_regime.total_tax,
            recommendation = recommendation.as_str(),
            "Regimes compared"
        );

        ComparisonResult {
            old_regime,
            new_regime,
            recommendation,
            savings,
            hra_breakdown: hra,
            lta_exemption: lta,
            section_80g_breakdown: old_deductions.section_80g,
            section_80gg_breakdown: old_deductions.section_80gg,
            section_80ccd_breakdown: section_80ccd_breakdown(&input, rules),
        }
    }

    /// Assesses an already computed taxable income under `regime`.
    ///
    /// `taxable_income` is rounded to the nearest ten first.
    pub fn assess(
        &self,
        regime: Regime,
        taxable_income: Decimal,
        age: u32,
    ) -> Assessment {
        assess(
            regime,
            round_to_ten(non_negative(taxable_income)),
            age,
            &self.rules,
        )
    }

    fn regime_result(
        &self,
        regime: Regime,
        age: u32,
        gross_total_income: Decimal,
        standard_deduction: Decimal,
        total_deductions: Decimal,
    ) -> TaxResult {
        let net_taxable_income = non_negative(gross_total_income - total_deductions);
        let assessment = self.assess(regime, net_taxable_income, age);

        TaxResult {
            regime,
            gross_total_income,
            standard_deduction,
            total_deductions,
            net_taxable_income,
            rounded_taxable_income: assessment.taxable_income,
            base_tax: assessment.base_tax,
            rebate: assessment.rebate.rebate,
            rebate_marginal_relief: assessment.rebate.marginal_relief,
            surcharge: assessment.surcharge.surcharge,
            surcharge_marginal_relief: assessment.surcharge.marginal_relief,
            marginal_relief: assessment.marginal_relief(),
            cess: assessment.cess,
            total_tax: assessment.total_tax,
            effective_rate: percentage_of(assessment.total_tax, gross_total_income),
            slab_breakdown: assessment.slab_breakdown,
        }
    }
}

/// Compares both regimes under the default FY 2025-26 rules.
pub fn calculate(input: &TaxpayerInput) -> ComparisonResult {
    TaxCalculator::default().calculate(input)
}
