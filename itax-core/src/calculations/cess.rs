//! Health and education cess.

use rust_decimal::Decimal;

use crate::calculations::common::round_rupee;
use crate::models::TaxRules;

/// Cess on tax after rebate plus surcharge, net of surcharge relief.
pub fn cess(
    tax_after_rebate: Decimal,
    surcharge: Decimal,
    marginal_relief: Decimal,
    rules: &TaxRules,
) -> Decimal {
    round_rupee((tax_after_rebate + surcharge - marginal_relief) * rules.cess_rate)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn cess_is_four_percent_of_tax() {
        let result = cess(dec!(157500), dec!(0), dec!(0), &TaxRules::default());

        assert_eq!(result, dec!(6300));
    }

    #[test]
    fn cess_applies_after_surcharge_relief() {
        let result = cess(
            dec!(1080030),
            dec!(108003),
            dec!(107933),
            &TaxRules::default(),
        );

        assert_eq!(result, dec!(43204));
    }

    #[test]
    fn cess_rounds_to_rupee() {
        let result = cess(dec!(10), dec!(0), dec!(0), &TaxRules::default());

        assert_eq!(result, dec!(0));
    }
}
