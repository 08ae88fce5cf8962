//! Market data error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketDataError {
    /// No cached quote and the provider could not supply one. Soft inside
    /// valuation (the holding is flagged instead of failing the read).
    #[error("No price available for symbol '{0}'")]
    PriceUnavailable(String),

    /// The upstream provider rejected or failed the request.
    #[error("Provider request failed: {0}")]
    Provider(String),

    #[error("Invalid quote data: {0}")]
    InvalidQuote(String),
}
