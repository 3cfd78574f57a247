//! Chapter VI-A deductions and regime-wise totals.
//!
//! The old regime allows the full set of capped deductions plus the HRA and LTA
//! exemptions. Sections 80GG and 80G are computed last because their limits
//! depend on adjusted total income (ATI), which is gross income net of the
//! other deductions:
//!
//! 1. base deductions (standard deduction through custom deductions)
//! 2. 80GG on `GTI - base`
//! 3. 80G on `GTI - base - 80GG`
//!
//! The new regime only allows the standard deduction, employer NPS under
//! 80CCD(2) and custom deductions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::{non_negative, round_rupee};
use crate::calculations::income::IncomeSummary;
use crate::models::{
    Donation, DonationBlock, Regime, Section80CcdBreakdown, Section80GBreakdown,
    Section80GgBreakdown, TaxRules, TaxpayerInput,
};

/// Every old-regime deduction, capped, along with the total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OldRegimeDeductions {
    pub standard_deduction: Decimal,
    pub professional_tax: Decimal,
    pub hra_exemption: Decimal,
    pub lta_exemption: Decimal,
    pub section_80c: Decimal,
    pub section_80d: Decimal,
    pub section_80ccd_1b: Decimal,
    pub section_80ccd_2: Decimal,
    /// Section 80TTA, or 80TTB for senior citizens.
    pub interest_deduction: Decimal,
    pub section_80e: Decimal,
    pub custom_deductions: Decimal,
    pub section_80gg: Section80GgBreakdown,
    pub section_80g: Section80GBreakdown,
    pub total: Decimal,
}

/// New-regime deductions and their total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegimeDeductions {
    pub standard_deduction: Decimal,
    pub section_80ccd_2: Decimal,
    pub custom_deductions: Decimal,
    pub total: Decimal,
}

/// Computes all old-regime deductions.
///
/// `hra_exemption` and `lta_exemption` come from the exemption stage.
pub fn old_regime_deductions(
    input: &TaxpayerInput,
    income: &IncomeSummary,
    hra_exemption: Decimal,
    lta_exemption: Decimal,
    rules: &TaxRules,
) -> OldRegimeDeductions {
    let standard_deduction = income.salary_income.min(rules.standard_deduction_old);
    let section_80c = input.section_80c.min(rules.section_80c_limit);
    let section_80d = section_80d(input, rules);
    let section_80ccd_1b = input.section_80ccd_1b.min(rules.section_80ccd_1b_limit);
    let section_80ccd_2 = section_80ccd_2(input, Regime::Old, rules);
    let interest_deduction = interest_deduction(input, rules);
    let custom_deductions = custom_deductions(input);

    let base = standard_deduction
        + input.professional_tax
        + hra_exemption
        + lta_exemption
        + section_80c
        + section_80d
        + section_80ccd_1b
        + section_80ccd_2
        + interest_deduction
        + input.section_80e
        + custom_deductions;

    let gross = income.gross_total_income_old;
    let section_80gg = section_80gg(input, non_negative(gross - base), rules);
    let section_80g = section_80g(
        non_negative(gross - base - section_80gg.eligible_deduction),
        &input.donations,
        rules,
    );

    let total = base + section_80gg.eligible_deduction + section_80g.total;
    debug!(
        base = %base,
        section_80gg = %section_80gg.eligible_deduction,
        section_80g = %section_80g.total,
        total = %total,
        "Old regime deductions"
    );

    OldRegimeDeductions {
        standard_deduction,
        professional_tax: input.professional_tax,
        hra_exemption,
        lta_exemption,
        section_80c,
        section_80d,
        section_80ccd_1b,
        section_80ccd_2,
        interest_deduction,
        section_80e: input.section_80e,
        custom_deductions,
        section_80gg,
        section_80g,
        total,
    }
}

/// Computes the deductions the new regime allows.
pub fn new_regime_deductions(
    input: &TaxpayerInput,
    income: &IncomeSummary,
    rules: &TaxRules,
) -> NewRegimeDeductions {
    let standard_deduction = income.salary_income.min(rules.standard_deduction_new);
    let section_80ccd_2 = section_80ccd_2(input, Regime::New, rules);
    let custom_deductions = custom_deductions(input);

    NewRegimeDeductions {
        standard_deduction,
        section_80ccd_2,
        custom_deductions,
        total: standard_deduction + section_80ccd_2 + custom_deductions,
    }
}

/// Section 80D health insurance, capped separately for self and parents.
///
/// Preventive health check-ups count towards the self limit, up to ₹5,000.
/// Each tier's limit doubles when the insured (the taxpayer, or the older
/// parent) is a senior citizen.
pub fn section_80d(
    input: &TaxpayerInput,
    rules: &TaxRules,
) -> Decimal {
    let tier_limit = |senior: bool| {
        if senior {
            rules.section_80d_senior_limit
        } else {
            rules.section_80d_limit
        }
    };

    let self_claim =
        input.health_insurance_self + input.preventive_checkup.min(rules.preventive_checkup_limit);
    let self_allowed = self_claim.min(tier_limit(rules.is_senior(input.age)));

    let parents_senior = input
        .eldest_parent_age()
        .is_some_and(|age| rules.is_senior(age));
    let parents_allowed = input
        .health_insurance_parents
        .min(tier_limit(parents_senior));

    round_rupee(self_allowed + parents_allowed)
}

/// Employer NPS contribution allowed under Section 80CCD(2).
pub fn section_80ccd_2(
    input: &TaxpayerInput,
    regime: Regime,
    rules: &TaxRules,
) -> Decimal {
    let rate = match regime {
        Regime::New => rules.section_80ccd_2_new_regime_rate,
        Regime::Old if input.is_government_employee => rules.section_80ccd_2_government_rate,
        Regime::Old => rules.section_80ccd_2_private_rate,
    };
    round_rupee(input.section_80ccd_2.min(rate * input.basic_plus_da()))
}

/// NPS amounts shown alongside the comparison.
pub fn section_80ccd_breakdown(
    input: &TaxpayerInput,
    rules: &TaxRules,
) -> Section80CcdBreakdown {
    Section80CcdBreakdown {
        eligible_1b: input.section_80ccd_1b.min(rules.section_80ccd_1b_limit),
        eligible_2_old: section_80ccd_2(input, Regime::Old, rules),
        eligible_2_new: section_80ccd_2(input, Regime::New, rules),
    }
}

/// Interest deduction: Section 80TTB (all deposit interest) for senior
/// citizens, otherwise Section 80TTA (savings interest only).
pub fn interest_deduction(
    input: &TaxpayerInput,
    rules: &TaxRules,
) -> Decimal {
    if rules.is_senior(input.age) {
        input.total_interest().min(rules.section_80ttb_limit)
    } else {
        input.savings_interest.min(rules.section_80tta_limit)
    }
}

/// Section 80GG rent deduction for taxpayers who receive no HRA.
///
/// `adjusted_total_income` is gross total income less every other old-regime
/// deduction except 80GG and 80G. Returns an all-zero breakdown when the
/// taxpayer receives HRA or pays no rent.
pub fn section_80gg(
    input: &TaxpayerInput,
    adjusted_total_income: Decimal,
    rules: &TaxRules,
) -> Section80GgBreakdown {
    let annual_rent = input.annual_rent();
    if input.hra_received != Decimal::ZERO || annual_rent <= Decimal::ZERO {
        return Section80GgBreakdown::default();
    }

    let fixed_limit = rules.section_80gg_limit;
    let income_limit = rules.section_80gg_income_rate * adjusted_total_income;
    let rent_excess_limit =
        non_negative(annual_rent - rules.section_80gg_rent_excess_rate * adjusted_total_income);
    let eligible_deduction = round_rupee(fixed_limit.min(income_limit).min(rent_excess_limit));

    Section80GgBreakdown {
        adjusted_total_income: round_rupee(adjusted_total_income),
        fixed_limit: round_rupee(fixed_limit),
        income_limit: round_rupee(income_limit),
        rent_excess_limit: round_rupee(rent_excess_limit),
        eligible_deduction,
    }
}

/// Section 80G donation relief.
///
/// `adjusted_total_income` is gross total income less every other old-regime
/// deduction, 80GG included. The qualifying limit is 10% of it; block 3
/// donations use it first and block 4 donations get half of whatever remains.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::{Donation, DonationBlock, TaxRules};
/// use itax_core::calculations::deductions::section_80g;
///
/// let donations = vec![Donation {
///     id: "1".into(),
///     fund_name: "Local trust".into(),
///     amount: dec!(150000),
///     block: DonationBlock::FullLimited,
/// }];
///
/// let relief = section_80g(dec!(1000000), &donations, &TaxRules::default());
///
/// assert_eq!(relief.qualifying_limit, dec!(100000));
/// assert_eq!(relief.total, dec!(100000));
/// ```
pub fn section_80g(
    adjusted_total_income: Decimal,
    donations: &[Donation],
    rules: &TaxRules,
) -> Section80GBreakdown {
    let qualifying_limit = rules.section_80g_qualifying_rate * adjusted_total_income;

    let mut blocks = [Decimal::ZERO; 4];
    for donation in donations {
        let index = usize::from(u8::from(donation.block)) - 1;
        blocks[index] += donation.amount;
    }
    let [block1, block2, block3, block4] = blocks;

    let half = Decimal::new(5, 1);
    let relief_block1 = block1;
    let relief_block2 = block2 * half;
    let relief_block3 = block3.min(qualifying_limit);
    let relief_block4 = block4.min(non_negative(qualifying_limit - relief_block3)) * half;

    Section80GBreakdown {
        adjusted_total_income: round_rupee(adjusted_total_income),
        qualifying_limit: round_rupee(qualifying_limit),
        relief_block1: round_rupee(relief_block1),
        relief_block2: round_rupee(relief_block2),
        relief_block3: round_rupee(relief_block3),
        relief_block4: round_rupee(relief_block4),
        total: round_rupee(relief_block1 + relief_block2 + relief_block3 + relief_block4),
    }
}

fn custom_deductions(input: &TaxpayerInput) -> Decimal {
    input.custom_deductions.iter().map(|item| item.amount).sum()
}
