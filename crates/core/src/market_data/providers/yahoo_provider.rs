//! Yahoo Finance quote provider.
//!
//! Wraps the public Yahoo Finance endpoints via the `yahoo_finance_api`
//! crate: no API key, global equity/ETF coverage, latest quotes plus
//! symbol search. Prices arrive in the instrument's listing currency.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use super::super::market_data_errors::MarketDataError;
use super::super::market_data_model::{Quote, QuoteSummary};
use super::super::market_data_traits::MarketDataProviderTrait;
use crate::errors::Result;

pub struct YahooProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooProvider {
    pub fn new() -> Result<Self> {
        let connector = yahoo_finance_api::YahooConnector::new()
            .map_err(|e| MarketDataError::Provider(format!("Failed to create connector: {}", e)))?;
        Ok(Self { connector })
    }

    fn decimal_from_price(value: f64, symbol: &str) -> Result<Decimal> {
        Decimal::from_f64(value).ok_or_else(|| {
            MarketDataError::InvalidQuote(format!("Unrepresentable price {} for {}", value, symbol))
                .into()
        })
    }
}

#[async_trait]
impl MarketDataProviderTrait for YahooProvider {
    fn id(&self) -> &'static str {
        "YAHOO"
    }

    async fn fetch_latest_quote(&self, symbol: &str) -> Result<Quote> {
        let response = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| {
                MarketDataError::Provider(format!("Failed to fetch quote for {}: {}", symbol, e))
            })?;

        let latest = response.last_quote().map_err(|e| {
            MarketDataError::Provider(format!("No quote data for {}: {}", symbol, e))
        })?;

        let as_of = DateTime::<Utc>::from_timestamp(latest.timestamp as i64, 0)
            .map(|dt| dt.naive_utc())
            .unwrap_or_else(|| Utc::now().naive_utc());

        Ok(Quote {
            symbol: symbol.to_uppercase(),
            company_name: None,
            price: Self::decimal_from_price(latest.close, symbol)?,
            previous_close: None,
            as_of,
            updated_at: Utc::now().naive_utc(),
        })
    }

    async fn search(&self, query: &str) -> Result<Vec<QuoteSummary>> {
        let result = self.connector.search_ticker(query).await.map_err(|e| {
            MarketDataError::Provider(format!("Symbol search failed for '{}': {}", query, e))
        })?;

        Ok(result
            .quotes
            .into_iter()
            .map(|item| QuoteSummary {
                symbol: item.symbol,
                name: Some(item.long_name).filter(|n| !n.is_empty()),
                exchange: Some(item.exchange).filter(|e| !e.is_empty()),
                asset_kind: Some(item.quote_type).filter(|t| !t.is_empty()),
            })
            .collect())
    }
}
