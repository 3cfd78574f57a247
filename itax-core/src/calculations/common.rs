//! Rounding and clamping helpers shared by every stage of the engine.
//!
//! Income-tax figures are whole rupees. Intermediate amounts are rounded to the
//! nearest rupee, while taxable income and the final tax are rounded to the
//! nearest multiple of ten (Sections 288A and 288B).

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to the nearest whole rupee, with halves rounding towards positive
/// infinity.
///
/// Loss figures (negative house-property income) therefore round `-10.5` to
/// `-10`, not `-11`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_rupee;
///
/// assert_eq!(round_rupee(dec!(12499.49)), dec!(12499));
/// assert_eq!(round_rupee(dec!(12499.50)), dec!(12500));
/// assert_eq!(round_rupee(dec!(-10.5)), dec!(-10));
/// ```
pub fn round_rupee(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

/// Rounds to the nearest multiple of ten rupees, with a trailing 5 rounding up.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_to_ten;
///
/// assert_eq!(round_to_ten(dec!(1125004)), dec!(1125000));
/// assert_eq!(round_to_ten(dec!(1125005)), dec!(1125010));
/// ```
pub fn round_to_ten(value: Decimal) -> Decimal {
    round_rupee(value / Decimal::TEN) * Decimal::TEN
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Used for percentages shown next to rupee figures.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(13.654)), dec!(13.65));
/// assert_eq!(round_half_up(dec!(13.655)), dec!(13.66));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a value at zero.
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Returns `part / whole` as a percentage rounded to two places, or zero when
/// `whole` is not positive.
pub fn percentage_of(
    part: Decimal,
    whole: Decimal,
) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round_half_up(part / whole * Decimal::ONE_HUNDRED)
}

/// Formats an amount in lakhs for slab labels, e.g. `250000` as `2.5L`.
pub(crate) fn lakhs(amount: Decimal) -> String {
    format!("{}L", (amount / Decimal::from(100_000)).normalize())
}
