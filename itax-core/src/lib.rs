pub mod calculations;
pub mod models;

pub use calculations::{
    Assessment, SideHustleEstimate, SideHustleInput, TaxCalculator, calculate,
    estimate_side_hustle,
};
pub use models::*;
