//! Market data repository, provider and service traits.

use std::collections::HashMap;

use async_trait::async_trait;

use super::market_data_model::{Quote, QuoteSummary};
use crate::errors::Result;

/// Contract for the quote cache.
#[async_trait]
pub trait QuoteRepositoryTrait: Send + Sync {
    fn get_quote(&self, symbol: &str) -> Result<Option<Quote>>;

    /// Loads cached quotes for the given symbols; missing symbols are
    /// simply absent from the result.
    fn get_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>>;

    async fn upsert_quote(&self, quote: Quote) -> Result<Quote>;
}

/// Contract for an external quote provider.
#[async_trait]
pub trait MarketDataProviderTrait: Send + Sync {
    /// Short identifier used in logs ("YAHOO", ...).
    fn id(&self) -> &'static str;

    async fn fetch_latest_quote(&self, symbol: &str) -> Result<Quote>;

    async fn search(&self, query: &str) -> Result<Vec<QuoteSummary>>;
}

/// Contract for price lookups as consumed by the valuation service and
/// the API layer.
#[async_trait]
pub trait MarketDataServiceTrait: Send + Sync {
    /// Returns the latest known quote for a symbol, refreshing the cache
    /// when it has gone stale. A provider failure falls back to the stale
    /// cached quote; with no cached quote at all it becomes
    /// `PriceUnavailable`.
    async fn get_quote(&self, symbol: &str) -> Result<Quote>;

    /// Batch variant for valuation: symbols whose price cannot be
    /// resolved are absent from the map rather than failing the call.
    async fn get_quotes(&self, symbols: &[String]) -> Result<HashMap<String, Quote>>;

    async fn search_symbols(&self, query: &str) -> Result<Vec<QuoteSummary>>;
}
