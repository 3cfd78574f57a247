//! Text and JSON rendering of calculation results.

use std::fmt;

use clap::ValueEnum;
use itax_core::{ComparisonResult, SideHustleEstimate, SlabEntry, TaxResult};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::utils::{format_inr, format_percent};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One row of a batch run, as written in JSON output.
#[derive(Debug, Serialize)]
pub struct BatchEntry<'a> {
    pub row: usize,
    pub label: Option<&'a str>,
    pub result: &'a ComparisonResult,
}

/// Side-by-side text report for one comparison.
pub struct ComparisonReport<'a> {
    label: Option<&'a str>,
    result: &'a ComparisonResult,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(result: &'a ComparisonResult) -> Self {
        Self {
            label: None,
            result,
        }
    }

    pub fn with_label(
        mut self,
        label: Option<&'a str>,
    ) -> Self {
        self.label = label;
        self
    }
}

fn row(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    old: &str,
    new: &str,
) -> fmt::Result {
    writeln!(f, "{name:<24}{old:>16}{new:>16}")
}

fn amount_row(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    old: &TaxResult,
    new: &TaxResult,
    field: fn(&TaxResult) -> Decimal,
) -> fmt::Result {
    row(f, name, &format_inr(field(old)), &format_inr(field(new)))
}

fn rate_percent(rate: Decimal) -> String {
    format!("{}%", (rate * Decimal::ONE_HUNDRED).normalize())
}

fn write_slabs(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    slabs: &[SlabEntry],
) -> fmt::Result {
    writeln!(f, "{title}")?;
    if slabs.is_empty() {
        return writeln!(f, "  (no taxable income)");
    }
    for slab in slabs {
        writeln!(
            f,
            "  {:<22}{:>6}{:>16}",
            slab.label,
            rate_percent(slab.rate),
            format_inr(slab.tax)
        )?;
    }
    Ok(())
}

impl fmt::Display for ComparisonReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.result;
        let (old, new) = (&result.old_regime, &result.new_regime);

        if let Some(label) = self.label {
            writeln!(f, "== {label} ==")?;
        }

        row(f, "", "Old regime", "New regime")?;
        amount_row(f, "Gross total income", old, new, |r| r.gross_total_income)?;
        amount_row(f, "Standard deduction", old, new, |r| r.standard_deduction)?;
        amount_row(f, "Total deductions", old, new, |r| r.total_deductions)?;
        amount_row(f, "Taxable income", old, new, |r| r.rounded_taxable_income)?;
        amount_row(f, "Slab tax", old, new, |r| r.base_tax)?;
        amount_row(f, "Rebate (87A)", old, new, |r| r.rebate)?;
        amount_row(f, "Marginal relief", old, new, |r| r.marginal_relief)?;
        amount_row(f, "Surcharge", old, new, |r| r.surcharge)?;
        amount_row(f, "Cess", old, new, |r| r.cess)?;
        amount_row(f, "Total tax", old, new, |r| r.total_tax)?;
        row(
            f,
            "Effective rate",
            &format_percent(old.effective_rate),
            &format_percent(new.effective_rate),
        )?;

        writeln!(f)?;
        write_slabs(f, "Old regime slabs:", &old.slab_breakdown)?;
        write_slabs(f, "New regime slabs:", &new.slab_breakdown)?;

        let hra = &result.hra_breakdown;
        if hra.received > Decimal::ZERO {
            writeln!(
                f,
                "HRA exemption: {} (least of received {}, rent over 10% {}, salary limit {})",
                format_inr(hra.exemption),
                format_inr(hra.received),
                format_inr(hra.rent_excess_limit),
                format_inr(hra.salary_percentage_limit),
            )?;
        }
        if result.lta_exemption > Decimal::ZERO {
            writeln!(f, "LTA exemption: {}", format_inr(result.lta_exemption))?;
        }
        let gg = &result.section_80gg_breakdown;
        if gg.eligible_deduction > Decimal::ZERO {
            writeln!(
                f,
                "Section 80GG: {} (least of {}, {}, {})",
                format_inr(gg.eligible_deduction),
                format_inr(gg.fixed_limit),
                format_inr(gg.income_limit),
                format_inr(gg.rent_excess_limit),
            )?;
        }
        let g = &result.section_80g_breakdown;
        if g.total > Decimal::ZERO {
            writeln!(
                f,
                "Section 80G: {} (qualifying limit {})",
                format_inr(g.total),
                format_inr(g.qualifying_limit),
            )?;
        }

        writeln!(f)?;
        write!(
            f,
            "Recommendation: {} (saves {})",
            result.recommendation,
            format_inr(result.savings)
        )
    }
}

/// Text report for a side-hustle estimate.
pub struct SideHustleReport<'a>(pub &'a SideHustleEstimate);

impl fmt::Display for SideHustleReport<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let estimate = self.0;
        writeln!(
            f,
            "Presumptive income:     {}",
            format_inr(estimate.presumptive_income)
        )?;
        writeln!(
            f,
            "Total income:           {}",
            format_inr(estimate.total_income)
        )?;
        writeln!(
            f,
            "Tax on salary only:     {}",
            format_inr(estimate.salary_only_tax)
        )?;
        writeln!(
            f,
            "Tax with freelance:     {}",
            format_inr(estimate.combined_tax)
        )?;
        writeln!(
            f,
            "Extra tax:              {}",
            format_inr(estimate.incremental_tax)
        )?;
        write!(
            f,
            "Rate on freelance:      {}",
            format_percent(estimate.marginal_rate_on_freelance)
        )
    }
}
