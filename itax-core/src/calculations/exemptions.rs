//! Salary exemptions available only under the old regime.

use rust_decimal::Decimal;

use crate::calculations::common::{non_negative, round_rupee};
use crate::models::{HraBreakdown, TaxRules, TaxpayerInput};

/// House rent allowance exemption under Section 10(13A).
///
/// The exemption is the least of:
/// 1. HRA actually received,
/// 2. annual rent paid less 10% of basic + DA,
/// 3. 50% of basic + DA in a metro, 40% elsewhere.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::{TaxRules, TaxpayerInput};
/// use itax_core::calculations::exemptions::hra_exemption;
///
/// let input = TaxpayerInput {
///     basic_salary: dec!(600000),
///     hra_received: dec!(300000),
///     rent_paid: dec!(20000),
///     ..TaxpayerInput::default()
/// };
///
/// let hra = hra_exemption(&input, &TaxRules::default());
///
/// assert_eq!(hra.rent_excess_limit, dec!(180000));
/// assert_eq!(hra.exemption, dec!(180000));
/// ```
pub fn hra_exemption(
    input: &TaxpayerInput,
    rules: &TaxRules,
) -> HraBreakdown {
    let basic_plus_da = input.basic_plus_da();

    let rent_excess_limit =
        non_negative(input.annual_rent() - rules.hra_rent_excess_rate * basic_plus_da);
    let salary_rate = if input.is_metro {
        rules.hra_metro_rate
    } else {
        rules.hra_non_metro_rate
    };
    let salary_percentage_limit = salary_rate * basic_plus_da;

    let exemption = round_rupee(
        input
            .hra_received
            .min(rent_excess_limit)
            .min(salary_percentage_limit),
    );

    HraBreakdown {
        received: input.hra_received,
        rent_excess_limit: round_rupee(rent_excess_limit),
        salary_percentage_limit: round_rupee(salary_percentage_limit),
        exemption,
    }
}

/// Leave travel allowance exemption: the lesser of LTA received and the
/// amount actually spent on eligible travel.
pub fn lta_exemption(input: &TaxpayerInput) -> Decimal {
    round_rupee(input.lta_received.min(input.lta_spent))
}
