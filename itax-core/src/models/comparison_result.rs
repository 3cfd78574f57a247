use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Regime, TaxResult};

/// The three HRA limits and the resulting exemption.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HraBreakdown {
    pub received: Decimal,
    /// Annual rent paid less 10% of basic + DA.
    pub rent_excess_limit: Decimal,
    /// 50% (metro) or 40% (non-metro) of basic + DA.
    pub salary_percentage_limit: Decimal,
    pub exemption: Decimal,
}

/// Section 80GG limits. All zero when 80GG does not apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section80GgBreakdown {
    pub adjusted_total_income: Decimal,
    /// Flat annual ceiling.
    pub fixed_limit: Decimal,
    /// 25% of adjusted total income.
    pub income_limit: Decimal,
    /// Rent paid less 10% of adjusted total income.
    pub rent_excess_limit: Decimal,
    pub eligible_deduction: Decimal,
}

/// Section 80G relief per donation block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section80GBreakdown {
    pub adjusted_total_income: Decimal,
    pub qualifying_limit: Decimal,
    pub relief_block1: Decimal,
    pub relief_block2: Decimal,
    pub relief_block3: Decimal,
    pub relief_block4: Decimal,
    pub total: Decimal,
}

/// NPS contributions allowed under Section 80CCD.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section80CcdBreakdown {
    pub eligible_1b: Decimal,
    pub eligible_2_old: Decimal,
    pub eligible_2_new: Decimal,
}

/// Both regimes side by side, with the cheaper one recommended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub old_regime: TaxResult,
    pub new_regime: TaxResult,
    pub recommendation: Regime,
    /// Absolute difference between the two final liabilities.
    pub savings: Decimal,

    pub hra_breakdown: HraBreakdown,
    pub lta_exemption: Decimal,
    pub section_80g_breakdown: Section80GBreakdown,
    pub section_80gg_breakdown: Section80GgBreakdown,
    pub section_80ccd_breakdown: Section80CcdBreakdown,
}

impl ComparisonResult {
    /// Result for the recommended regime.
    pub fn recommended(&self) -> &TaxResult {
        self.result_for(self.recommendation)
    }

    pub fn result_for(
        &self,
        regime: Regime,
    ) -> &TaxResult {
        match regime {
            Regime::Old => &self.old_regime,
            Regime::New => &self.new_regime,
        }
    }
}
