//! Income-tax calculations for FY 2025-26 (AY 2026-27).
//!
//! Each stage of the comparison lives in its own module; [`comparison`]
//! orchestrates them for both regimes.

pub mod assessment;
pub mod cess;
pub mod common;
pub mod comparison;
pub mod deductions;
pub mod exemptions;
pub mod income;
pub mod rebate;
pub mod side_hustle;
pub mod slabs;
pub mod surcharge;

pub use assessment::Assessment;
pub use comparison::{TaxCalculator, calculate};
pub use side_hustle::{SideHustleEstimate, SideHustleInput, estimate_side_hustle};
