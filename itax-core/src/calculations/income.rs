//! Income aggregation: salary, house property and other sources.
//!
//! Salary income is the same under both regimes; HRA and LTA received are
//! included in full and any exemption is handled as a deduction. House
//! property is where the regimes part ways:
//!
//! | Property      | Old regime                                   | New regime                        |
//! |---------------|----------------------------------------------|-----------------------------------|
//! | Self-occupied | loss of interest, capped at ₹2,00,000        | nil                               |
//! | Let out       | 70% of rent less interest, loss floor ₹2L    | 70% of rent less interest, ≥ 0    |

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{non_negative, round_rupee};
use crate::models::{Regime, TaxRules, TaxpayerInput};

/// Gross income under each regime along with its components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSummary {
    pub salary_income: Decimal,
    pub interest_income: Decimal,
    pub house_property_old: Decimal,
    pub house_property_new: Decimal,
    pub gross_total_income_old: Decimal,
    pub gross_total_income_new: Decimal,
}

impl IncomeSummary {
    pub fn gross_total_income(
        &self,
        regime: Regime,
    ) -> Decimal {
        match regime {
            Regime::Old => self.gross_total_income_old,
            Regime::New => self.gross_total_income_new,
        }
    }
}

/// Aggregates all heads of income for both regimes.
pub fn aggregate_income(
    input: &TaxpayerInput,
    rules: &TaxRules,
) -> IncomeSummary {
    let salary_income = salary_income(input);
    let interest_income = input.total_interest();
    let house_property_old = house_property_income(input, Regime::Old, rules);
    let house_property_new = house_property_income(input, Regime::New, rules);

    IncomeSummary {
        salary_income,
        interest_income,
        house_property_old,
        house_property_new,
        gross_total_income_old: round_rupee(salary_income + house_property_old + interest_income),
        gross_total_income_new: round_rupee(salary_income + house_property_new + interest_income),
    }
}

/// Sum of every salary component, before exemptions.
pub fn salary_income(input: &TaxpayerInput) -> Decimal {
    let custom: Decimal = input.custom_allowances.iter().map(|item| item.amount).sum();

    input.basic_salary
        + input.dearness_allowance
        + input.special_allowance
        + input.leave_encashment
        + input.bonus
        + input.perquisites
        + input.hra_received
        + input.lta_received
        + custom
}

/// Net income from house property; negative for a loss.
pub fn house_property_income(
    input: &TaxpayerInput,
    regime: Regime,
    rules: &TaxRules,
) -> Decimal {
    let net_annual_value =
        input.rental_income * (Decimal::ONE - rules.rental_standard_deduction_rate);

    let net = match (regime, input.is_self_occupied) {
        (Regime::Old, true) => -input
            .home_loan_interest
            .min(rules.self_occupied_interest_limit),
        (Regime::Old, false) => {
            (net_annual_value - input.home_loan_interest).max(-rules.house_property_loss_limit)
        }
        (Regime::New, true) => Decimal::ZERO,
        (Regime::New, false) => non_negative(net_annual_value - input.home_loan_interest),
    };

    round_rupee(net)
}
