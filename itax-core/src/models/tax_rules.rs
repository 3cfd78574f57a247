use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a [`TaxRules`] set is internally inconsistent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxRulesError {
    /// A rate or percentage must lie between 0 and 1.
    #[error("{name} must be between 0 and 1, got {value}")]
    InvalidRate { name: &'static str, value: Decimal },

    /// Limits, caps and thresholds must not be negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeAmount { name: &'static str, value: Decimal },

    /// The 87A marginal relief band must start at the full-rebate limit.
    #[error("new regime marginal relief limit {relief_limit} is below the rebate limit {rebate_limit}")]
    InvertedRebateBand {
        rebate_limit: Decimal,
        relief_limit: Decimal,
    },

    /// Super-senior age must not precede senior age.
    #[error("super senior age {super_senior} is below senior age {senior}")]
    InvertedAgeBands { senior: u32, super_senior: u32 },
}

/// Statutory parameters for one assessment year.
///
/// [`TaxRules::default`] returns the FY 2025-26 (AY 2026-27) values. Every
/// field can be overridden individually when deserializing, e.g. from a TOML
/// rules file that only lists the values that differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRules {
    /// Standard deduction under the old regime (Section 16(ia)).
    pub standard_deduction_old: Decimal,
    /// Standard deduction under the new regime.
    pub standard_deduction_new: Decimal,

    /// Share of basic + DA exempt as HRA in a metro city.
    pub hra_metro_rate: Decimal,
    /// Share of basic + DA exempt as HRA elsewhere.
    pub hra_non_metro_rate: Decimal,
    /// Share of basic + DA that rent must exceed to count towards HRA.
    pub hra_rent_excess_rate: Decimal,

    /// Cap on home-loan interest for a self-occupied property (Section 24(b)).
    pub self_occupied_interest_limit: Decimal,
    /// Floor on the house-property loss set off against other heads.
    pub house_property_loss_limit: Decimal,
    /// Standard deduction on rent received from a let-out property (Section 24(a)).
    pub rental_standard_deduction_rate: Decimal,

    pub section_80c_limit: Decimal,
    pub section_80ccd_1b_limit: Decimal,
    /// Employer NPS cap as a share of basic + DA for government employees.
    pub section_80ccd_2_government_rate: Decimal,
    /// Employer NPS cap as a share of basic + DA for other employees.
    pub section_80ccd_2_private_rate: Decimal,
    /// Employer NPS cap under the new regime, regardless of employer.
    pub section_80ccd_2_new_regime_rate: Decimal,

    pub section_80d_limit: Decimal,
    pub section_80d_senior_limit: Decimal,
    pub preventive_checkup_limit: Decimal,

    /// Savings interest deduction below senior age (Section 80TTA).
    pub section_80tta_limit: Decimal,
    /// Deposit interest deduction for senior citizens (Section 80TTB).
    pub section_80ttb_limit: Decimal,

    pub section_80gg_limit: Decimal,
    /// Share of ATI capping the 80GG deduction.
    pub section_80gg_income_rate: Decimal,
    /// Share of ATI that rent must exceed to count towards 80GG.
    pub section_80gg_rent_excess_rate: Decimal,
    /// Share of ATI forming the 80G qualifying limit.
    pub section_80g_qualifying_rate: Decimal,

    /// Old regime: income at or below this gets a full 87A rebate.
    pub old_rebate_limit: Decimal,
    /// New regime: income at or below this gets a full 87A rebate.
    pub new_rebate_limit: Decimal,
    /// New regime: upper bound of the 87A marginal relief band.
    pub new_marginal_relief_limit: Decimal,

    /// Health and education cess on tax plus surcharge.
    pub cess_rate: Decimal,

    pub senior_age: u32,
    pub super_senior_age: u32,

    /// Share of freelance receipts deemed profit (Section 44ADA).
    pub presumptive_profit_rate: Decimal,
    /// Receipts at or above which the higher profit rate is assumed.
    pub presumptive_receipts_limit: Decimal,
    /// Assumed profit share once receipts reach the limit.
    pub presumptive_profit_rate_above_limit: Decimal,
}

impl Default for TaxRules {
    fn default() -> Self {
        Self {
            standard_deduction_old: Decimal::from(50_000),
            standard_deduction_new: Decimal::from(75_000),
            hra_metro_rate: Decimal::new(50, 2),
            hra_non_metro_rate: Decimal::new(40, 2),
            hra_rent_excess_rate: Decimal::new(10, 2),
            self_occupied_interest_limit: Decimal::from(200_000),
            house_property_loss_limit: Decimal::from(200_000),
            rental_standard_deduction_rate: Decimal::new(30, 2),
            section_80c_limit: Decimal::from(150_000),
            section_80ccd_1b_limit: Decimal::from(50_000),
            section_80ccd_2_government_rate: Decimal::new(14, 2),
            section_80ccd_2_private_rate: Decimal::new(10, 2),
            section_80ccd_2_new_regime_rate: Decimal::new(14, 2),
            section_80d_limit: Decimal::from(25_000),
            section_80d_senior_limit: Decimal::from(50_000),
            preventive_checkup_limit: Decimal::from(5_000),
            section_80tta_limit: Decimal::from(10_000),
            section_80ttb_limit: Decimal::from(50_000),
            section_80gg_limit: Decimal::from(60_000),
            section_80gg_income_rate: Decimal::new(25, 2),
            section_80gg_rent_excess_rate: Decimal::new(10, 2),
            section_80g_qualifying_rate: Decimal::new(10, 2),
            old_rebate_limit: Decimal::from(500_000),
            new_rebate_limit: Decimal::from(1_200_000),
            new_marginal_relief_limit: Decimal::from(1_275_000),
            cess_rate: Decimal::new(4, 2),
            senior_age: 60,
            super_senior_age: 80,
            presumptive_profit_rate: Decimal::new(50, 2),
            presumptive_receipts_limit: Decimal::from(7_500_000),
            presumptive_profit_rate_above_limit: Decimal::new(80, 2),
        }
    }
}

impl TaxRules {
    /// Checks that every rate is a fraction, every amount is non-negative and
    /// the banded thresholds are ordered.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use itax_core::{TaxRules, TaxRulesError};
    ///
    /// let rules = TaxRules {
    ///     cess_rate: dec!(4),
    ///     ..TaxRules::default()
    /// };
    ///
    /// assert_eq!(
    ///     rules.validate(),
    ///     Err(TaxRulesError::InvalidRate { name: "cess_rate", value: dec!(4) })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), TaxRulesError> {
        let rates = [
            ("hra_metro_rate", self.hra_metro_rate),
            ("hra_non_metro_rate", self.hra_non_metro_rate),
            ("hra_rent_excess_rate", self.hra_rent_excess_rate),
            (
                "rental_standard_deduction_rate",
                self.rental_standard_deduction_rate,
            ),
            (
                "section_80ccd_2_government_rate",
                self.section_80ccd_2_government_rate,
            ),
            (
                "section_80ccd_2_private_rate",
                self.section_80ccd_2_private_rate,
            ),
            (
                "section_80ccd_2_new_regime_rate",
                self.section_80ccd_2_new_regime_rate,
            ),
            ("section_80gg_income_rate", self.section_80gg_income_rate),
            (
                "section_80gg_rent_excess_rate",
                self.section_80gg_rent_excess_rate,
            ),
            (
                "section_80g_qualifying_rate",
                self.section_80g_qualifying_rate,
            ),
            ("cess_rate", self.cess_rate),
            ("presumptive_profit_rate", self.presumptive_profit_rate),
            (
                "presumptive_profit_rate_above_limit",
                self.presumptive_profit_rate_above_limit,
            ),
        ];
        for (name, value) in rates {
            if value < Decimal::ZERO || value > Decimal::ONE {
                return Err(TaxRulesError::InvalidRate { name, value });
            }
        }

        let amounts = [
            ("standard_deduction_old", self.standard_deduction_old),
            ("standard_deduction_new", self.standard_deduction_new),
            (
                "self_occupied_interest_limit",
                self.self_occupied_interest_limit,
            ),
            ("house_property_loss_limit", self.house_property_loss_limit),
            ("section_80c_limit", self.section_80c_limit),
            ("section_80ccd_1b_limit", self.section_80ccd_1b_limit),
            ("section_80d_limit", self.section_80d_limit),
            ("section_80d_senior_limit", self.section_80d_senior_limit),
            ("preventive_checkup_limit", self.preventive_checkup_limit),
            ("section_80tta_limit", self.section_80tta_limit),
            ("section_80ttb_limit", self.section_80ttb_limit),
            ("section_80gg_limit", self.section_80gg_limit),
            ("old_rebate_limit", self.old_rebate_limit),
            ("new_rebate_limit", self.new_rebate_limit),
            ("new_marginal_relief_limit", self.new_marginal_relief_limit),
            (
                "presumptive_receipts_limit",
                self.presumptive_receipts_limit,
            ),
        ];
        for (name, value) in amounts {
            if value < Decimal::ZERO {
                return Err(TaxRulesError::NegativeAmount { name, value });
            }
        }

        if self.new_marginal_relief_limit < self.new_rebate_limit {
            return Err(TaxRulesError::InvertedRebateBand {
                rebate_limit: self.new_rebate_limit,
                relief_limit: self.new_marginal_relief_limit,
            });
        }
        if self.super_senior_age < self.senior_age {
            return Err(TaxRulesError::InvertedAgeBands {
                senior: self.senior_age,
                super_senior: self.super_senior_age,
            });
        }
        Ok(())
    }

    /// Returns true when `age` qualifies for senior-citizen limits.
    pub fn is_senior(
        &self,
        age: u32,
    ) -> bool {
        age >= self.senior_age
    }
}
