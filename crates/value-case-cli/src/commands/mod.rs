pub mod comparison;
pub mod deals;
pub mod simulate;
pub mod strategy;
pub mod valuation;
