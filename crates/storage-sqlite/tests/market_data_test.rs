//! Quote cache behavior over the real quotes table.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use stockfolio_core::errors::Result;
use stockfolio_core::market_data::{
    MarketDataError, MarketDataProviderTrait, MarketDataService, MarketDataServiceTrait, Quote,
    QuoteRepositoryTrait, QuoteSummary,
};

struct CountingProvider {
    price: Option<Decimal>,
    calls: AtomicUsize,
}

impl CountingProvider {
    fn with_price(price: Decimal) -> Arc<Self> {
        Arc::new(Self {
            price: Some(price),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            price: None,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl MarketDataProviderTrait for CountingProvider {
    fn id(&self) -> &'static str {
        "COUNTING"
    }

    async fn fetch_latest_quote(&self, symbol: &str) -> Result<Quote> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now().naive_utc();
        match self.price {
            Some(price) => Ok(Quote {
                symbol: symbol.to_string(),
                company_name: Some("Test Corp".to_string()),
                price,
                previous_close: None,
                as_of: now,
                updated_at: now,
            }),
            None => Err(MarketDataError::Provider("provider down".to_string()).into()),
        }
    }

    async fn search(&self, _query: &str) -> Result<Vec<QuoteSummary>> {
        Ok(vec![])
    }
}

#[tokio::test]
async fn first_lookup_fetches_and_caches() {
    let ctx = common::setup();
    let provider = CountingProvider::with_price(dec!(182.50));
    let service = MarketDataService::new(ctx.quote_repository.clone(), provider.clone());

    let quote = service.get_quote("AAPL").await.unwrap();
    assert_eq!(quote.price, dec!(182.50));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

    // Second lookup is served from the cache.
    let quote = service.get_quote("AAPL").await.unwrap();
    assert_eq!(quote.price, dec!(182.50));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

    // The row is durably cached.
    let cached = ctx.quote_repository.get_quote("AAPL").unwrap().unwrap();
    assert_eq!(cached.price, dec!(182.50));
    assert_eq!(cached.company_name.as_deref(), Some("Test Corp"));
}

#[tokio::test]
async fn stale_cache_triggers_a_refresh() {
    let ctx = common::setup();

    // Seed a quote that is older than the freshness window.
    let stale_time = Utc::now().naive_utc() - Duration::hours(3);
    ctx.quote_repository
        .upsert_quote(Quote {
            symbol: "AAPL".to_string(),
            company_name: None,
            price: dec!(150),
            previous_close: None,
            as_of: stale_time,
            updated_at: stale_time,
        })
        .await
        .unwrap();

    let provider = CountingProvider::with_price(dec!(182.50));
    let service = MarketDataService::new(ctx.quote_repository.clone(), provider.clone());

    let quote = service.get_quote("AAPL").await.unwrap();
    assert_eq!(quote.price, dec!(182.50));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn provider_outage_serves_the_stale_quote() {
    let ctx = common::setup();

    let stale_time = Utc::now().naive_utc() - Duration::hours(3);
    ctx.quote_repository
        .upsert_quote(Quote {
            symbol: "AAPL".to_string(),
            company_name: None,
            price: dec!(150),
            previous_close: None,
            as_of: stale_time,
            updated_at: stale_time,
        })
        .await
        .unwrap();

    let service = MarketDataService::new(ctx.quote_repository.clone(), CountingProvider::failing());

    let quote = service.get_quote("AAPL").await.unwrap();
    assert_eq!(quote.price, dec!(150));
}

#[tokio::test]
async fn unknown_symbol_with_no_provider_is_unavailable() {
    let ctx = common::setup();
    let service = MarketDataService::new(ctx.quote_repository.clone(), CountingProvider::failing());

    let err = service.get_quote("NOPE").await.unwrap_err();
    assert!(matches!(
        err,
        stockfolio_core::Error::MarketData(MarketDataError::PriceUnavailable(_))
    ));
}
