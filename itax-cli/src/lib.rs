pub mod csv_loader;
pub mod input;
pub mod logging;
pub mod report;
pub mod utils;
