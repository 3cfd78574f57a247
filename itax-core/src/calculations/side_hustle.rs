//! Tax cost of freelance income on top of a salary.
//!
//! Freelance receipts are taxed on a presumptive basis (Section 44ADA): 50% of
//! gross receipts is deemed profit, or 80% once receipts reach ₹75L. Both the
//! salary-only and combined figures are assessed under the new regime, with the
//! standard deduction limited to the salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, percentage_of, round_rupee};
use crate::calculations::comparison::TaxCalculator;
use crate::models::{MAX_AMOUNT, Regime, TaxRules};

/// Salary and freelance receipts for one financial year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideHustleInput {
    pub salary: Decimal,
    pub freelance_receipts: Decimal,
    pub age: u32,
}

/// How much extra tax the freelance income costs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideHustleEstimate {
    pub presumptive_income: Decimal,
    pub salary_only_tax: Decimal,
    pub combined_tax: Decimal,
    pub incremental_tax: Decimal,
    pub total_income: Decimal,
    /// Incremental tax as a percentage of presumptive income.
    pub marginal_rate_on_freelance: Decimal,
}

/// Deemed profit on `receipts` under the presumptive scheme.
pub fn presumptive_income(
    receipts: Decimal,
    rules: &TaxRules,
) -> Decimal {
    let rate = if receipts >= rules.presumptive_receipts_limit {
        rules.presumptive_profit_rate_above_limit
    } else {
        rules.presumptive_profit_rate
    };
    round_rupee(non_negative(receipts).min(MAX_AMOUNT) * rate)
}

impl TaxCalculator {
    /// Estimates the incremental new-regime tax on freelance receipts.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use itax_core::TaxCalculator;
    /// use itax_core::calculations::side_hustle::SideHustleInput;
    ///
    /// let estimate = TaxCalculator::default().estimate_side_hustle(&SideHustleInput {
    ///     salary: dec!(1500000),
    ///     freelance_receipts: dec!(1000000),
    ///     age: 30,
    /// });
    ///
    /// assert_eq!(estimate.presumptive_income, dec!(500000));
    /// assert_eq!(estimate.incremental_tax, dec!(94900));
    /// ```
    pub fn estimate_side_hustle(
        &self,
        input: &SideHustleInput,
    ) -> SideHustleEstimate {
        let rules = self.rules();
        let salary = non_negative(input.salary).min(MAX_AMOUNT);
        let presumptive_income = presumptive_income(input.freelance_receipts, rules);
        let total_income = salary + presumptive_income;
        // Only salary earns the standard deduction.
        let standard_deduction = salary.min(rules.standard_deduction_new);

        let salary_only = self.assess(Regime::New, salary - standard_deduction, input.age);
        let combined = self.assess(Regime::New, total_income - standard_deduction, input.age);

        let incremental_tax = non_negative(combined.total_tax - salary_only.total_tax);
        debug!(
            presumptive_income = %presumptive_income,
            salary_only_tax = %salary_only.total_tax,
            combined_tax = %combined.total_tax,
            "Side hustle estimated"
        );

        SideHustleEstimate {
            presumptive_income,
            salary_only_tax: salary_only.total_tax,
            combined_tax: combined.total_tax,
            incremental_tax,
            total_income,
            marginal_rate_on_freelance: percentage_of(incremental_tax, presumptive_income),
        }
    }
}

/// Estimates freelance tax under the default rules.
pub fn estimate_side_hustle(input: &SideHustleInput) -> SideHustleEstimate {
    TaxCalculator::default().estimate_side_hustle(input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn input(
        salary: Decimal,
        freelance_receipts: Decimal,
    ) -> SideHustleInput {
        SideHustleInput {
            salary,
            freelance_receipts,
            age: 30,
        }
    }

    // =========================================================================
    // presumptive_income tests
    // =========================================================================

    #[test]
    fn presumptive_income_is_half_of_receipts() {
        assert_eq!(
            presumptive_income(dec!(1000000), &TaxRules::default()),
            dec!(500000)
        );
    }

    #[test]
    fn presumptive_income_rate_rises_at_receipts_limit() {
        let rules = TaxRules::default();

        assert_eq!(presumptive_income(dec!(7499990), &rules), dec!(3749995));
        assert_eq!(presumptive_income(dec!(7500000), &rules), dec!(6000000));
        assert_eq!(presumptive_income(dec!(8000000), &rules), dec!(6400000));
    }

    // =========================================================================
    // estimate_side_hustle tests
    // =========================================================================

    #[test]
    fn freelance_income_pushes_salary_into_higher_slabs() {
        let result = estimate_side_hustle(&input(dec!(1500000), dec!(1000000)));

        assert_eq!(
            result,
            SideHustleEstimate {
                presumptive_income: dec!(500000),
                salary_only_tax: dec!(97500),
                combined_tax: dec!(192400),
                incremental_tax: dec!(94900),
                total_income: dec!(2000000),
                marginal_rate_on_freelance: dec!(18.98),
            }
        );
    }

    #[test]
    fn rebate_absorbs_small_side_income() {
        let result = estimate_side_hustle(&input(dec!(1000000), dec!(400000)));

        assert_eq!(result.presumptive_income, dec!(200000));
        assert_eq!(result.salary_only_tax, dec!(0));
        assert_eq!(result.combined_tax, dec!(0));
        assert_eq!(result.marginal_rate_on_freelance, dec!(0));
    }

    #[test]
    fn no_receipts_means_no_incremental_tax() {
        let result = estimate_side_hustle(&input(dec!(2000000), dec!(0)));

        assert_eq!(result.presumptive_income, dec!(0));
        assert_eq!(result.incremental_tax, dec!(0));
        assert_eq!(result.salary_only_tax, result.combined_tax);
        assert_eq!(result.marginal_rate_on_freelance, dec!(0));
    }

    #[test]
    fn salary_below_standard_deduction_is_not_negative() {
        let result = estimate_side_hustle(&input(dec!(50000), dec!(0)));

        assert_eq!(result.salary_only_tax, dec!(0));
        assert_eq!(result.total_income, dec!(50000));
    }

    #[test]
    fn standard_deduction_is_limited_to_salary() {
        let result = estimate_side_hustle(&input(dec!(50000), dec!(2700000)));

        // 13,50,000 taxable: 82,500 slab tax plus 3,300 cess.
        assert_eq!(result.presumptive_income, dec!(1350000));
        assert_eq!(result.salary_only_tax, dec!(0));
        assert_eq!(result.combined_tax, dec!(85800));
        assert_eq!(result.incremental_tax, dec!(85800));
    }

    #[test]
    fn huge_amounts_are_capped() {
        let result = estimate_side_hustle(&input(Decimal::MAX, Decimal::MAX));

        assert_eq!(result.presumptive_income, dec!(800000000000000));
        assert_eq!(result.total_income, dec!(1800000000000000));
        assert!(result.incremental_tax > Decimal::ZERO);
    }

    #[test]
    fn custom_presumptive_rate_is_used() {
        let rules = TaxRules {
            presumptive_profit_rate: dec!(0.60),
            ..TaxRules::default()
        };
        let calculator = TaxCalculator::new(rules).expect("rules should be valid");

        let result = calculator.estimate_side_hustle(&input(dec!(0), dec!(1000000)));

        assert_eq!(result.presumptive_income, dec!(600000));
    }
}
