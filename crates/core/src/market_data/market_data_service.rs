use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use log::{debug, warn};

use super::market_data_constants::quote_max_age;
use super::market_data_errors::MarketDataError;
use super::market_data_model::{Quote, QuoteSummary};
use super::market_data_traits::{
    MarketDataProviderTrait, MarketDataServiceTrait, QuoteRepositoryTrait,
};
use crate::errors::Result;

/// Read-through quote cache over an external provider.
pub struct MarketDataService {
    quote_repository: Arc<dyn QuoteRepositoryTrait>,
    provider: Arc<dyn MarketDataProviderTrait>,
    max_age: Duration,
}

impl MarketDataService {
    pub fn new(
        quote_repository: Arc<dyn QuoteRepositoryTrait>,
        provider: Arc<dyn MarketDataProviderTrait>,
    ) -> Self {
        Self::with_max_age(quote_repository, provider, quote_max_age())
    }

    pub fn with_max_age(
        quote_repository: Arc<dyn QuoteRepositoryTrait>,
        provider: Arc<dyn MarketDataProviderTrait>,
        max_age: Duration,
    ) -> Self {
        Self {
            quote_repository,
            provider,
            max_age,
        }
    }

    /// Fetches from the provider and caches the result. The stale cached
    /// quote (if any) is the fallback when the provider fails.
    async fn refresh_quote(&self, symbol: &str, cached: Option<Quote>) -> Result<Quote> {
        match self.provider.fetch_latest_quote(symbol).await {
            Ok(quote) => self.quote_repository.upsert_quote(quote).await,
            Err(e) => match cached {
                Some(stale) => {
                    warn!(
                        "Provider {} failed for {}: {}. Serving stale quote from {}",
                        self.provider.id(),
                        symbol,
                        e,
                        stale.updated_at
                    );
                    Ok(stale)
                }
                None => {
                    warn!(
                        "Provider {} failed for {} and no cached quote exists: {}",
                        self.provider.id(),
                        symbol,
                        e
                    );
                    Err(MarketDataError::PriceUnavailable(symbol.to_string()).into())
                }
            },
        }
    }
}

#[async_trait]
impl MarketDataServiceTrait for MarketDataService {
    async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = symbol.trim().to_uppercase();
        let cached = self.quote_repository.get_quote(&symbol)?;
        let now = Utc::now().naive_utc();

        match cached {
            Some(quote) if !quote.is_stale(now, self.max_age) => Ok(quote),
            cached => {
                debug!("Quote cache miss/stale for {}, refreshing", symbol);
                self.refresh_quote(&symbol, cached).await
            }
        }
    }

    async fn get_quotes(&self, symbols: &[String]) -> Result<HashMap<String, Quote>> {
        let mut quotes = HashMap::with_capacity(symbols.len());
        for symbol in symbols {
            match self.get_quote(symbol).await {
                Ok(quote) => {
                    quotes.insert(quote.symbol.clone(), quote);
                }
                // Per-symbol soft failure: the caller decides how to
                // degrade (valuation flags the holding).
                Err(e) => {
                    debug!("No price resolved for {}: {}", symbol, e);
                }
            }
        }
        Ok(quotes)
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<QuoteSummary>> {
        self.provider.search(query).await
    }
}
