pub mod market_data_constants;
pub mod market_data_errors;
pub mod market_data_model;
pub mod market_data_service;
pub mod market_data_traits;
pub mod providers;


pub use market_data_constants::{quote_max_age, QUOTE_MAX_AGE_SECONDS};
pub use market_data_errors::MarketDataError;
pub use market_data_model::{Quote, QuoteSummary};
pub use market_data_service::MarketDataService;
pub use market_data_traits::{
    MarketDataProviderTrait, MarketDataServiceTrait, QuoteRepositoryTrait,
};
