use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// How the declared rent amount is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentFrequency {
    #[default]
    Monthly,
    Annual,
}

impl RentFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Self::Monthly),
            "annual" | "yearly" | "year" | "a" | "y" => Some(Self::Annual),
            _ => None,
        }
    }

    /// Converts an amount at this frequency into an annual figure.
    pub fn annualize(
        &self,
        amount: Decimal,
    ) -> Decimal {
        match self {
            Self::Monthly => amount * Decimal::from(12),
            Self::Annual => amount,
        }
    }
}

/// A named, user-added salary or deduction line.
///
/// Order in the containing list is for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    pub id: String,
    pub name: String,
    pub amount: Decimal,
}

/// Error returned for a donation block outside 1..=4.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid 80G donation block {0}, expected 1 to 4")]
pub struct InvalidDonationBlock(pub u8);

/// Section 80G donation category, which fixes the relief percentage and
/// whether the qualifying limit applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DonationBlock {
    /// 100% deduction without qualifying limit.
    FullUnlimited,
    /// 50% deduction without qualifying limit.
    HalfUnlimited,
    /// 100% deduction subject to qualifying limit.
    FullLimited,
    /// 50% deduction subject to qualifying limit.
    HalfLimited,
}

impl TryFrom<u8> for DonationBlock {
    type Error = InvalidDonationBlock;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::FullUnlimited),
            2 => Ok(Self::HalfUnlimited),
            3 => Ok(Self::FullLimited),
            4 => Ok(Self::HalfLimited),
            other => Err(InvalidDonationBlock(other)),
        }
    }
}

impl From<DonationBlock> for u8 {
    fn from(block: DonationBlock) -> Self {
        match block {
            DonationBlock::FullUnlimited => 1,
            DonationBlock::HalfUnlimited => 2,
            DonationBlock::FullLimited => 3,
            DonationBlock::HalfLimited => 4,
        }
    }
}

/// A single 80G donation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Donation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub fund_name: String,
    pub amount: Decimal,
    pub block: DonationBlock,
}

/// Everything a salaried taxpayer declares for one financial year.
///
/// All amounts are annual rupee figures except `rent_paid`, whose period is
/// given by `rent_frequency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxpayerInput {
    // Demographics
    pub age: u32,
    pub father_age: Option<u32>,
    pub mother_age: Option<u32>,
    pub is_metro: bool,
    pub is_government_employee: bool,

    // Salary components
    pub basic_salary: Decimal,
    pub dearness_allowance: Decimal,
    pub special_allowance: Decimal,
    pub leave_encashment: Decimal,
    pub bonus: Decimal,
    pub perquisites: Decimal,
    pub custom_allowances: Vec<LineItem>,

    // Housing
    pub hra_received: Decimal,
    pub rent_paid: Decimal,
    pub rent_frequency: RentFrequency,
    pub home_loan_interest: Decimal,
    pub is_self_occupied: bool,
    pub rental_income: Decimal,

    // Leave travel allowance
    pub lta_received: Decimal,
    pub lta_spent: Decimal,

    // Other sources
    pub savings_interest: Decimal,
    pub fixed_deposit_interest: Decimal,

    // Deductions
    pub professional_tax: Decimal,
    pub section_80c: Decimal,
    pub section_80ccd_1b: Decimal,
    pub section_80ccd_2: Decimal,
    pub health_insurance_self: Decimal,
    pub health_insurance_parents: Decimal,
    pub preventive_checkup: Decimal,
    pub section_80e: Decimal,
    pub donations: Vec<Donation>,
    pub custom_deductions: Vec<LineItem>,
}

/// Largest amount accepted for any single field, ₹10^15.
///
/// Larger figures are capped so that every later sum stays well inside the
/// range of `Decimal`.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

impl Default for TaxpayerInput {
    /// The blank form: every amount zero, living in a metro, home (if any)
    /// self-occupied, rent declared monthly.
    fn default() -> Self {
        Self {
            age: 0,
            father_age: None,
            mother_age: None,
            is_metro: true,
            is_government_employee: false,
            basic_salary: Decimal::ZERO,
            dearness_allowance: Decimal::ZERO,
            special_allowance: Decimal::ZERO,
            leave_encashment: Decimal::ZERO,
            bonus: Decimal::ZERO,
            perquisites: Decimal::ZERO,
            custom_allowances: Vec::new(),
            hra_received: Decimal::ZERO,
            rent_paid: Decimal::ZERO,
            rent_frequency: RentFrequency::Monthly,
            home_loan_interest: Decimal::ZERO,
            is_self_occupied: true,
            rental_income: Decimal::ZERO,
            lta_received: Decimal::ZERO,
            lta_spent: Decimal::ZERO,
            savings_interest: Decimal::ZERO,
            fixed_deposit_interest: Decimal::ZERO,
            professional_tax: Decimal::ZERO,
            section_80c: Decimal::ZERO,
            section_80ccd_1b: Decimal::ZERO,
            section_80ccd_2: Decimal::ZERO,
            health_insurance_self: Decimal::ZERO,
            health_insurance_parents: Decimal::ZERO,
            preventive_checkup: Decimal::ZERO,
            section_80e: Decimal::ZERO,
            donations: Vec::new(),
            custom_deductions: Vec::new(),
        }
    }
}

impl TaxpayerInput {
    /// Basic salary plus dearness allowance, the base for HRA and NPS limits.
    pub fn basic_plus_da(&self) -> Decimal {
        self.basic_salary + self.dearness_allowance
    }

    /// Rent paid for the whole year.
    pub fn annual_rent(&self) -> Decimal {
        self.rent_frequency.annualize(self.rent_paid)
    }

    pub fn total_interest(&self) -> Decimal {
        self.savings_interest + self.fixed_deposit_interest
    }

    /// Age of the older parent, if any parent's age was given.
    pub fn eldest_parent_age(&self) -> Option<u32> {
        self.father_age.max(self.mother_age)
    }

    /// Returns a copy with every amount clamped to `0..=MAX_AMOUNT`.
    ///
    /// Each clamped field is logged at `warn` level.
    pub fn clamped(&self) -> Self {
        let mut input = self.clone();

        let scalars: [(&str, &mut Decimal); 22] = [
            ("basic_salary", &mut input.basic_salary),
            ("dearness_allowance", &mut input.dearness_allowance),
            ("special_allowance", &mut input.special_allowance),
            ("leave_encashment", &mut input.leave_encashment),
            ("bonus", &mut input.bonus),
            ("perquisites", &mut input.perquisites),
            ("hra_received", &mut input.hra_received),
            ("rent_paid", &mut input.rent_paid),
            ("home_loan_interest", &mut input.home_loan_interest),
            ("rental_income", &mut input.rental_income),
            ("lta_received", &mut input.lta_received),
            ("lta_spent", &mut input.lta_spent),
            ("savings_interest", &mut input.savings_interest),
            ("fixed_deposit_interest", &mut input.fixed_deposit_interest),
            ("professional_tax", &mut input.professional_tax),
            ("section_80c", &mut input.section_80c),
            ("section_80ccd_1b", &mut input.section_80ccd_1b),
            ("section_80ccd_2", &mut input.section_80ccd_2),
            ("health_insurance_self", &mut input.health_insurance_self),
            (
                "health_insurance_parents",
                &mut input.health_insurance_parents,
            ),
            ("preventive_checkup", &mut input.preventive_checkup),
            ("section_80e", &mut input.section_80e),
        ];
        for (field, value) in scalars {
            clamp_field(field, value);
        }

        for item in &mut input.custom_allowances {
            clamp_field("custom_allowances", &mut item.amount);
        }
        for item in &mut input.custom_deductions {
            clamp_field("custom_deductions", &mut item.amount);
        }
        for donation in &mut input.donations {
            clamp_field("donations", &mut donation.amount);
        }

        input
    }
}

fn clamp_field(
    field: &str,
    value: &mut Decimal,
) {
    if *value < Decimal::ZERO {
        warn!(field, value = %value, "Negative amount clamped to zero");
        *value = Decimal::ZERO;
    } else if *value > MAX_AMOUNT {
        warn!(field, value = %value, max = %MAX_AMOUNT, "Amount capped at ceiling");
        *value = MAX_AMOUNT;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn default_input_is_blank_metro_form() {
        let input = TaxpayerInput::default();

        assert_eq!(input.basic_salary, dec!(0));
        assert!(input.is_metro);
        assert!(input.is_self_occupied);
        assert_eq!(input.rent_frequency, RentFrequency::Monthly);
        assert!(input.donations.is_empty());
    }

    #[test]
    fn annual_rent_multiplies_monthly_rent() {
        let input = TaxpayerInput {
            rent_paid: dec!(20000),
            ..TaxpayerInput::default()
        };

        assert_eq!(input.annual_rent(), dec!(240000));
    }

    #[test]
    fn annual_rent_keeps_annual_rent() {
        let input = TaxpayerInput {
            rent_paid: dec!(240000),
            rent_frequency: RentFrequency::Annual,
            ..TaxpayerInput::default()
        };

        assert_eq!(input.annual_rent(), dec!(240000));
    }

    #[test]
    fn eldest_parent_age_picks_older_parent() {
        let input = TaxpayerInput {
            father_age: Some(58),
            mother_age: Some(61),
            ..TaxpayerInput::default()
        };

        assert_eq!(input.eldest_parent_age(), Some(61));
    }

    #[test]
    fn eldest_parent_age_is_none_without_parents() {
        let input = TaxpayerInput::default();

        assert_eq!(input.eldest_parent_age(), None);
    }

    #[test]
    fn clamped_zeroes_negative_amounts() {
        let input = TaxpayerInput {
            basic_salary: dec!(-100),
            section_80c: dec!(-5),
            custom_deductions: vec![LineItem {
                id: "1".into(),
                name: "Other".into(),
                amount: dec!(-10),
            }],
            ..TaxpayerInput::default()
        };

        let clamped = input.clamped();

        assert_eq!(clamped.basic_salary, dec!(0));
        assert_eq!(clamped.section_80c, dec!(0));
        assert_eq!(clamped.custom_deductions[0].amount, dec!(0));
    }

    #[test]
    fn clamped_keeps_positive_amounts() {
        let input = TaxpayerInput {
            basic_salary: dec!(1200000),
            ..TaxpayerInput::default()
        };

        let clamped = input.clamped();

        assert_eq!(clamped, input);
    }

    #[test]
    fn clamped_caps_huge_amounts() {
        let input = TaxpayerInput {
            basic_salary: Decimal::MAX,
            bonus: dec!(50000000000000000000000000000),
            donations: vec![Donation {
                id: "d1".into(),
                fund_name: "Relief fund".into(),
                amount: Decimal::MAX,
                block: DonationBlock::FullUnlimited,
            }],
            ..TaxpayerInput::default()
        };

        let clamped = input.clamped();

        assert_eq!(clamped.basic_salary, MAX_AMOUNT);
        assert_eq!(clamped.bonus, MAX_AMOUNT);
        assert_eq!(clamped.donations[0].amount, MAX_AMOUNT);
    }

    #[test]
    fn max_amount_is_ten_to_the_fifteenth() {
        assert_eq!(MAX_AMOUNT, dec!(1000000000000000));
    }

    #[test]
    fn donation_block_rejects_out_of_range_values() {
        assert_eq!(DonationBlock::try_from(5), Err(InvalidDonationBlock(5)));
        assert_eq!(DonationBlock::try_from(3), Ok(DonationBlock::FullLimited));
    }

    #[test]
    fn donation_deserializes_block_number() {
        let donation: Donation =
            serde_json::from_str(r#"{ "fund_name": "PM CARES", "amount": "5000", "block": 1 }"#)
                .expect("donation should deserialize");

        assert_eq!(donation.block, DonationBlock::FullUnlimited);
        assert_eq!(donation.amount, dec!(5000));
    }

    #[test]
    fn rent_frequency_parses_common_spellings() {
        assert_eq!(RentFrequency::parse("Monthly"), Some(RentFrequency::Monthly));
        assert_eq!(RentFrequency::parse("yearly"), Some(RentFrequency::Annual));
        assert_eq!(RentFrequency::parse("weekly"), None);
    }
}
