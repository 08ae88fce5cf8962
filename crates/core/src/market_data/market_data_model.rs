//! Market data domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Last known price snapshot for a symbol.
///
/// `as_of` is the provider's quote time; `updated_at` is when this cache
/// row was written. Staleness decisions use `updated_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: String,
    pub company_name: Option<String>,
    pub price: Decimal,
    pub previous_close: Option<Decimal>,
    pub as_of: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Quote {
    /// Whether this cached quote is older than the given freshness window.
    pub fn is_stale(&self, now: NaiveDateTime, max_age: chrono::Duration) -> bool {
        now - self.updated_at > max_age
    }
}

/// A symbol search hit returned by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    pub symbol: String,
    pub name: Option<String>,
    pub exchange: Option<String>,
    pub asset_kind: Option<String>,
}
