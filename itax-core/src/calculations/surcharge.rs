//! Surcharge on income tax with marginal relief.
//!
//! | Taxable income above | Old regime | New regime |
//! |----------------------|------------|------------|
//! | ₹5,00,00,000         | 37%        | -          |
//! | ₹2,00,00,000         | 25%        | 25%        |
//! | ₹1,00,00,000         | 15%        | 15%        |
//! | ₹50,00,000           | 10%        | 10%        |
//!
//! Marginal relief limits tax plus surcharge to what it would be at the tier
//! threshold plus the income earned above that threshold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::round_rupee;
use crate::calculations::rebate::apply_rebate;
use crate::calculations::slabs::slab_tax;
use crate::models::{Regime, TaxRules};

/// A surcharge tier: income strictly above `threshold` attracts `rate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeTier {
    pub threshold: Decimal,
    pub rate: Decimal,
}

/// Surcharge and the marginal relief against it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surcharge {
    pub rate: Decimal,
    /// Surcharge before relief.
    pub surcharge: Decimal,
    pub marginal_relief: Decimal,
}

/// Surcharge tiers for the regime, highest threshold first.
pub fn surcharge_tiers(regime: Regime) -> Vec<SurchargeTier> {
    let tier = |threshold: i64, percent: i64| SurchargeTier {
        threshold: Decimal::from(threshold),
        rate: Decimal::new(percent, 2),
    };

    let mut tiers = Vec::with_capacity(4);
    if regime == Regime::Old {
        tiers.push(tier(50_000_000, 37));
    }
    tiers.extend([
        tier(20_000_000, 25),
        tier(10_000_000, 15),
        tier(5_000_000, 10),
    ]);
    tiers
}

/// Tax after rebate at `taxable_income` under `regime`.
///
/// The surcharge threshold comparison uses this to price tax at exactly the
/// tier threshold.
pub fn tax_after_rebate_at(
    regime: Regime,
    taxable_income: Decimal,
    age: u32,
    rules: &TaxRules,
) -> Decimal {
    let base_tax = slab_tax(regime, taxable_income, age, rules).base_tax;
    apply_rebate(regime, taxable_income, base_tax, rules).tax_after_rebate
}

/// Computes surcharge on `tax` (tax after rebate) and any marginal relief.
///
/// At the threshold itself the next lower tier's rate applies, since tiers
/// start strictly above their threshold.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::{Regime, TaxRules};
/// use itax_core::calculations::surcharge::apply_surcharge;
///
/// // ₹100 above the ₹50L threshold
/// let result = apply_surcharge(Regime::New, dec!(5000100), dec!(1080030), 30, &TaxRules::default());
///
/// assert_eq!(result.surcharge, dec!(108003));
/// assert_eq!(result.marginal_relief, dec!(107933));
/// ```
pub fn apply_surcharge(
    regime: Regime,
    taxable_income: Decimal,
    tax: Decimal,
    age: u32,
    rules: &TaxRules,
) -> Surcharge {
    let tiers = surcharge_tiers(regime);
    let Some(index) = tiers
        .iter()
        .position(|tier| taxable_income > tier.threshold)
    else {
        return Surcharge::default();
    };

    let tier = tiers[index];
    let surcharge = round_rupee(tax * tier.rate);
    let tax_with_surcharge = tax + surcharge;

    let threshold_rate = tiers
        .get(index + 1)
        .map_or(Decimal::ZERO, |lower| lower.rate);
    let threshold_tax = tax_after_rebate_at(regime, tier.threshold, age, rules);
    let threshold_surcharge = round_rupee(threshold_tax * threshold_rate);
    let ceiling = threshold_tax + threshold_surcharge + (taxable_income - tier.threshold);

    let marginal_relief = if tax_with_surcharge > ceiling {
        round_rupee(tax_with_surcharge - ceiling)
    } else {
        Decimal::ZERO
    };

    debug!(
        regime = regime.as_str(),
        rate = %tier.rate,
        surcharge = %surcharge,
        ceiling = %ceiling,
        marginal_relief = %marginal_relief,
        "Surcharge computed"
    );

    Surcharge {
        rate: tier.rate,
        surcharge,
        marginal_relief,
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

    fn surcharge_for(
        regime: Regime,
        income: Decimal,
    ) -> Surcharge {
        let tax = tax_after_rebate_at(regime, income, 30, &rules());
        apply_surcharge(regime, income, tax, 30, &rules())
    }

    // =========================================================================
    // surcharge_tiers tests
    // =========================================================================

    #[test]
    fn old_regime_has_extra_top_tier() {
        let old = surcharge_tiers(Regime::Old);
        let new = surcharge_tiers(Regime::New);

        assert_eq!(old.len(), 4);
        assert_eq!(old[0].rate, dec!(0.37));
        assert_eq!(new.len(), 3);
        assert_eq!(new[0].rate, dec!(0.25));
    }

    // =========================================================================
    // apply_surcharge tests
    // =========================================================================

    #[test]
    fn no_surcharge_at_or_below_fifty_lakh() {
        let result = surcharge_for(Regime::New, dec!(5000000));

        assert_eq!(result, Surcharge::default());
    }

    #[test]
    fn marginal_relief_just_above_fifty_lakh() {
        let result = surcharge_for(Regime::New, dec!(5000100));

        assert_eq!(
            result,
            Surcharge {
                rate: dec!(0.10),
                surcharge: dec!(108003),
                marginal_relief: dec!(107933),
            }
        );
    }

    #[test]
    fn no_marginal_relief_well_above_threshold() {
        let result = surcharge_for(Regime::New, dec!(6000000));

        // Tax 1380000, surcharge 138000; ceiling 1080000 + 1000000
        assert_eq!(result.surcharge, dec!(138000));
        assert_eq!(result.marginal_relief, dec!(0));
    }

    #[test]
    fn threshold_uses_lower_tier_rate_at_one_crore() {
        let result = surcharge_for(Regime::Old, dec!(10000100));

        // Tax at 1 crore (old, age 30): 112500 + 2700000 = 2812500
        // Ceiling: 2812500 + 281250 (10%) + 100 = 3093850
        // Tax at income: 2812530, surcharge 15% = 421880
        assert_eq!(result.rate, dec!(0.15));
        assert_eq!(result.surcharge, dec!(421880));
        assert_eq!(result.marginal_relief, dec!(140560));
    }

    #[test]
    fn old_regime_top_tier_above_five_crore() {
        let result = surcharge_for(Regime::Old, dec!(60000000));

        assert_eq!(result.rate, dec!(0.37));
        assert_eq!(result.marginal_relief, dec!(0));
    }

    #[test]
    fn new_regime_caps_at_twenty_five_percent() {
        let result = surcharge_for(Regime::New, dec!(60000000));

        assert_eq!(result.rate, dec!(0.25));
    }
}
