//! Progressive slab tax for both regimes.
//!
//! # Old regime
//!
//! | Income band                   | Rate |
//! |-------------------------------|------|
//! | up to exemption limit         | 0%   |
//! | exemption limit - ₹5,00,000   | 5%   |
//! | ₹5,00,000 - ₹10,00,000        | 20%  |
//! | above ₹10,00,000              | 30%  |
//!
//! The exemption limit is ₹2,50,000, ₹3,00,000 for senior citizens and
//! ₹5,00,000 for super senior citizens.
//!
//! # New regime
//!
//! Seven bands of ₹4,00,000 from 0% to 30%, identical for every age.
//!
//! In both regimes the tax on each band is rounded to the rupee before being
//! summed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{lakhs, round_rupee};
use crate::models::{Regime, SlabEntry, TaxRules};

/// Upper limit (exclusive of the next band) and marginal rate of a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Band {
    upper: Option<Decimal>,
    rate: Decimal,
}

/// Slab tax and the band-by-band detail behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlabTax {
    pub base_tax: Decimal,
    pub breakdown: Vec<SlabEntry>,
}

fn new_regime_bands() -> [Band; 7] {
    let band = |upper: Option<i64>, percent: i64| Band {
        upper: upper.map(Decimal::from),
        rate: Decimal::new(percent, 2),
    };
    [
        band(Some(400_000), 0),
        band(Some(800_000), 5),
        band(Some(1_200_000), 10),
        band(Some(1_600_000), 15),
        band(Some(2_000_000), 20),
        band(Some(2_400_000), 25),
        band(None, 30),
    ]
}

fn old_regime_bands(exemption_limit: Decimal) -> [Band; 4] {
    [
        Band {
            upper: Some(exemption_limit),
            rate: Decimal::ZERO,
        },
        Band {
            upper: Some(Decimal::from(500_000)),
            rate: Decimal::new(5, 2),
        },
        Band {
            upper: Some(Decimal::from(1_000_000)),
            rate: Decimal::new(20, 2),
        },
        Band {
            upper: None,
            rate: Decimal::new(30, 2),
        },
    ]
}

/// Basic exemption limit under the old regime for the given age.
pub fn old_regime_exemption_limit(
    age: u32,
    rules: &TaxRules,
) -> Decimal {
    if age >= rules.super_senior_age {
        Decimal::from(500_000)
    } else if age >= rules.senior_age {
        Decimal::from(300_000)
    } else {
        Decimal::from(250_000)
    }
}

/// Slab tax under the regime, dispatching to the age-banded old schedule or
/// the flat new schedule.
pub fn slab_tax(
    regime: Regime,
    taxable_income: Decimal,
    age: u32,
    rules: &TaxRules,
) -> SlabTax {
    match regime {
        Regime::Old => old_regime_slab_tax(taxable_income, age, rules),
        Regime::New => new_regime_slab_tax(taxable_income),
    }
}

/// Old-regime slab tax.
///
/// Only bands holding a positive slice of income are listed; a super senior
/// citizen, whose exemption limit equals the top of the 5% band, never sees a
/// 5% row.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::TaxRules;
/// use itax_core::calculations::slabs::old_regime_slab_tax;
///
/// let result = old_regime_slab_tax(dec!(1150000), 30, &TaxRules::default());
///
/// assert_eq!(result.base_tax, dec!(157500));
/// assert_eq!(result.breakdown.len(), 4);
/// ```
pub fn old_regime_slab_tax(
    taxable_income: Decimal,
    age: u32,
    rules: &TaxRules,
) -> SlabTax {
    let exemption_limit = old_regime_exemption_limit(age, rules);
    let mut base_tax = Decimal::ZERO;
    let mut breakdown = Vec::new();

    let mut lower = Decimal::ZERO;
    for band in old_regime_bands(exemption_limit) {
        let upper = band.upper.map_or(taxable_income, |upper| upper.min(taxable_income));
        let portion = upper - lower;
        if portion > Decimal::ZERO {
            let tax = round_rupee(portion * band.rate);
            base_tax += tax;
            breakdown.push(SlabEntry {
                label: band_label(lower, band.upper),
                rate: band.rate,
                tax,
            });
        }
        match band.upper {
            Some(limit) => lower = lower.max(limit),
            None => break,
        }
    }

    SlabTax {
        base_tax: round_rupee(base_tax),
        breakdown,
    }
}

/// New-regime slab tax.
///
/// Bands are listed up to and including the one containing the income; the
/// scan stops at the first band whose lower bound the income does not exceed.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::slabs::new_regime_slab_tax;
///
/// let result = new_regime_slab_tax(dec!(1600000));
///
/// assert_eq!(result.base_tax, dec!(120000));
/// assert_eq!(result.breakdown.len(), 4);
/// ```
pub fn new_regime_slab_tax(taxable_income: Decimal) -> SlabTax {
    let mut base_tax = Decimal::ZERO;
    let mut breakdown = Vec::new();

    let mut lower = Decimal::ZERO;
    for band in new_regime_bands() {
        if taxable_income <= lower {
            break;
        }
        let upper = band.upper.map_or(taxable_income, |upper| upper.min(taxable_income));
        let tax = round_rupee((upper - lower) * band.rate);
        base_tax += tax;
        breakdown.push(SlabEntry {
            label: band_label(lower, band.upper),
            rate: band.rate,
            tax,
        });
        match band.upper {
            Some(limit) => lower = limit,
            None => break,
        }
    }

    SlabTax {
        base_tax: round_rupee(base_tax),
        breakdown,
    }
}

fn band_label(
    lower: Decimal,
    upper: Option<Decimal>,
) -> String {
    match upper {
        Some(upper) if lower.is_zero() => format!("Up to ₹{}", lakhs(upper)),
        Some(upper) => format!("₹{} - ₹{}", lakhs(lower), lakhs(upper)),
        None => format!("Above ₹{}", lakhs(lower)),
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

    fn entry(
        label: &str,
        rate: Decimal,
        tax: Decimal,
    ) -> SlabEntry {
        SlabEntry {
            label: label.to_string(),
            rate,
            tax,
        }
    }

    // =========================================================================
    // old_regime_exemption_limit tests
    // =========================================================================

    #[test]
    fn exemption_limit_by_age() {
        assert_eq!(old_regime_exemption_limit(59, &rules()), dec!(250000));
        assert_eq!(old_regime_exemption_limit(60, &rules()), dec!(300000));
        assert_eq!(old_regime_exemption_limit(79, &rules()), dec!(300000));
        assert_eq!(old_regime_exemption_limit(80, &rules()), dec!(500000));
    }

    // =========================================================================
    // old_regime_slab_tax tests
    // =========================================================================

    #[test]
    fn old_regime_zero_income_has_empty_breakdown() {
        let result = old_regime_slab_tax(dec!(0), 30, &rules());

        assert_eq!(result.base_tax, dec!(0));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn old_regime_income_within_exemption_limit() {
        let result = old_regime_slab_tax(dec!(200000), 30, &rules());

        assert_eq!(result.base_tax, dec!(0));
        assert_eq!(
            result.breakdown,
            vec![entry("Up to ₹2.5L", dec!(0), dec!(0))]
        );
    }

    #[test]
    fn old_regime_all_bands() {
        let result = old_regime_slab_tax(dec!(1150000), 30, &rules());

        assert_eq!(result.base_tax, dec!(157500));
        assert_eq!(
            result.breakdown,
            vec![
                entry("Up to ₹2.5L", dec!(0), dec!(0)),
                entry("₹2.5L - ₹5L", dec!(0.05), dec!(12500)),
                entry("₹5L - ₹10L", dec!(0.20), dec!(100000)),
                entry("Above ₹10L", dec!(0.30), dec!(45000)),
            ]
        );
    }

    #[test]
    fn old_regime_senior_citizen_threshold() {
        let result = old_regime_slab_tax(dec!(700000), 65, &rules());

        // 5% of 200000 + 20% of 200000
        assert_eq!(result.base_tax, dec!(50000));
        assert_eq!(result.breakdown[0].label, "Up to ₹3L");
        assert_eq!(result.breakdown[1].label, "₹3L - ₹5L");
    }

    #[test]
    fn old_regime_super_senior_skips_five_percent_band() {
        let result = old_regime_slab_tax(dec!(700000), 82, &rules());

        assert_eq!(result.base_tax, dec!(40000));
        assert_eq!(
            result.breakdown,
            vec![
                entry("Up to ₹5L", dec!(0), dec!(0)),
                entry("₹5L - ₹10L", dec!(0.20), dec!(40000)),
            ]
        );
    }

    #[test]
    fn old_regime_rounds_each_band() {
        let result = old_regime_slab_tax(dec!(250010), 30, &rules());

        // 5% of 10 = 0.5, rounded up to 1
        assert_eq!(result.base_tax, dec!(1));
    }

    // =========================================================================
    // new_regime_slab_tax tests
    // =========================================================================

    #[test]
    fn new_regime_zero_income_has_empty_breakdown() {
        let result = new_regime_slab_tax(dec!(0));

        assert_eq!(result.base_tax, dec!(0));
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn new_regime_income_exactly_at_band_limit_stops_there() {
        let result = new_regime_slab_tax(dec!(800000));

        assert_eq!(result.base_tax, dec!(20000));
        assert_eq!(
            result.breakdown,
            vec![
                entry("Up to ₹4L", dec!(0), dec!(0)),
                entry("₹4L - ₹8L", dec!(0.05), dec!(20000)),
            ]
        );
    }

    #[test]
    fn new_regime_income_just_above_band_limit_adds_next_band() {
        let result = new_regime_slab_tax(dec!(800010));

        assert_eq!(result.base_tax, dec!(20001));
        assert_eq!(result.breakdown.len(), 3);
        assert_eq!(result.breakdown[2], entry("₹8L - ₹12L", dec!(0.10), dec!(1)));
    }

    #[test]
    fn new_regime_top_band() {
        let result = new_regime_slab_tax(dec!(5000000));

        assert_eq!(result.base_tax, dec!(1080000));
        assert_eq!(result.breakdown.len(), 7);
        assert_eq!(
            result.breakdown[6],
            entry("Above ₹24L", dec!(0.30), dec!(780000))
        );
    }

    #[test]
    fn slab_tax_dispatches_by_regime() {
        let old = slab_tax(Regime::Old, dec!(1000000), 30, &rules());
        let new = slab_tax(Regime::New, dec!(1000000), 30, &rules());

        assert_eq!(old.base_tax, dec!(112500));
        assert_eq!(new.base_tax, dec!(40000));
    }
}
