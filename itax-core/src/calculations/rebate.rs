//! Section 87A rebate and the new regime's marginal relief.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::non_negative;
use crate::models::{Regime, TaxRules};

/// Outcome of applying Section 87A to the slab tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rebate {
    /// Full rebate, equal to the slab tax when income is within the limit.
    pub rebate: Decimal,
    /// Relief keeping tax at or below the income in excess of the limit.
    pub marginal_relief: Decimal,
    /// Slab tax less rebate and relief, never negative.
    pub tax_after_rebate: Decimal,
}

/// Applies Section 87A to `base_tax`.
///
/// - Old regime: full rebate up to ₹5,00,000; no marginal relief.
/// - New regime: full rebate up to ₹12,00,000; between ₹12,00,000 and
///   ₹12,75,000 tax is capped at the income above ₹12,00,000.
pub fn apply_rebate(
    regime: Regime,
    taxable_income: Decimal,
    base_tax: Decimal,
    rules: &TaxRules,
) -> Rebate {
    let rebate_limit = match regime {
        Regime::Old => rules.old_rebate_limit,
        Regime::New => rules.new_rebate_limit,
    };

    let rebate = if taxable_income <= rebate_limit {
        base_tax
    } else {
        Decimal::ZERO
    };

    let marginal_relief = match regime {
        Regime::New
            if taxable_income > rules.new_rebate_limit
                && taxable_income <= rules.new_marginal_relief_limit =>
        {
            let excess_income = taxable_income - rules.new_rebate_limit;
            non_negative(base_tax - excess_income)
        }
        _ => Decimal::ZERO,
    };

    Rebate {
        rebate,
        marginal_relief,
        tax_after_rebate: non_negative(base_tax - rebate - marginal_relief),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn rules() -> TaxRules {
        TaxRules::default()
    }

    // =========================================================================
    // old regime
    // =========================================================================

    #[test]
    fn old_regime_full_rebate_at_limit() {
        let result = apply_rebate(Regime::Old, dec!(500000), dec!(12500), &rules());

        assert_eq!(
            result,
            Rebate {
                rebate: dec!(12500),
                marginal_relief: dec!(0),
                tax_after_rebate: dec!(0),
            }
        );
    }

    #[test]
    fn old_regime_no_rebate_or_relief_above_limit() {
        let result = apply_rebate(Regime::Old, dec!(500010), dec!(12502), &rules());

        assert_eq!(result.rebate, dec!(0));
        assert_eq!(result.marginal_relief, dec!(0));
        assert_eq!(result.tax_after_rebate, dec!(12502));
    }

    // =========================================================================
    // new regime
    // =========================================================================

    #[test]
    fn new_regime_full_rebate_at_limit() {
        let result = apply_rebate(Regime::New, dec!(1200000), dec!(60000), &rules());

        assert_eq!(result.rebate, dec!(60000));
        assert_eq!(result.tax_after_rebate, dec!(0));
    }

    #[test]
    fn new_regime_marginal_relief_caps_tax_at_excess_income() {
        let result = apply_rebate(Regime::New, dec!(1210000), dec!(61500), &rules());

        assert_eq!(
            result,
            Rebate {
                rebate: dec!(0),
                marginal_relief: dec!(51500),
                tax_after_rebate: dec!(10000),
            }
        );
    }

    #[test]
    fn new_regime_marginal_relief_band_upper_limit() {
        let result = apply_rebate(Regime::New, dec!(1275000), dec!(71250), &rules());

        // Slab tax is already below the excess income, so no relief is due
        assert_eq!(result.marginal_relief, dec!(0));
        assert_eq!(result.tax_after_rebate, dec!(71250));
    }

    #[test]
    fn new_regime_no_relief_above_band() {
        let result = apply_rebate(Regime::New, dec!(1275010), dec!(71252), &rules());

        assert_eq!(result.rebate, dec!(0));
        assert_eq!(result.marginal_relief, dec!(0));
        assert_eq!(result.tax_after_rebate, dec!(71252));
    }
}
