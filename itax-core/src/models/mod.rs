mod comparison_result;
mod tax_result;
mod tax_rules;
mod taxpayer_input;

pub use comparison_result::{
    ComparisonResult, HraBreakdown, Section80CcdBreakdown, Section80GBreakdown,
    Section80GgBreakdown,
};
pub use tax_result::{Regime, SlabEntry, TaxResult};
pub use tax_rules::{TaxRules, TaxRulesError};
pub use taxpayer_input::{
    Donation, DonationBlock, InvalidDonationBlock, LineItem, MAX_AMOUNT, RentFrequency,
    TaxpayerInput,
};
