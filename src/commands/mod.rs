pub mod calc;
pub mod claim;
pub mod config;
pub mod sale;
