//! Derived holding models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-symbol position derived by folding the transaction ledger.
///
/// Never persisted: the ledger is the single source of truth and a
/// holding is recomputed from it on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    /// Net shares: sum of BUY quantities minus sum of SELL quantities.
    pub total_shares: Decimal,
    /// Net cost basis: BUY totals minus SELL totals, at transaction-time
    /// amounts.
    pub total_invested: Decimal,
    /// total_invested / total_shares; zero when no shares are held.
    pub average_price: Decimal,
}
