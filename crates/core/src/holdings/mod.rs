pub mod holdings_model;
pub mod holdings_service;


pub use holdings_model::Holding;
pub use holdings_service::{aggregate_holdings, HoldingsService, HoldingsServiceTrait};
