pub mod valuation_model;
pub mod valuation_service;

#[cfg(test)]
mod valuation_service_tests;

pub use valuation_model::{PortfolioSnapshot, ValuedHolding};
pub use valuation_service::{ValuationService, ValuationServiceTrait};
