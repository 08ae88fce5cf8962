//! Core domain logic for Stockfolio.
//!
//! This crate holds the portfolio account, the transaction ledger, the
//! derived holdings/valuation services and the market data lookup, all
//! defined against repository traits. The SQLite implementation of those
//! traits lives in `stockfolio-storage-sqlite`; the HTTP surface lives in
//! the server app.

pub mod db;
pub mod errors;
pub mod holdings;
pub mod market_data;
pub mod portfolios;
pub mod transactions;
pub mod valuation;
pub mod watchlists;

pub use errors::{Error, Result};
