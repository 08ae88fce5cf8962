//! Valuation read models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A holding combined with its latest market price.
///
/// When no price can be resolved the holding is still reported, with
/// `price_unavailable` set and the valued fields absent; it contributes
/// nothing to the snapshot totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuedHolding {
    pub symbol: String,
    pub shares: Decimal,
    pub average_price: Decimal,
    pub total_invested: Decimal,
    pub current_price: Option<Decimal>,
    pub current_value: Option<Decimal>,
    pub profit: Option<Decimal>,
    pub profit_percentage: Option<Decimal>,
    pub price_unavailable: bool,
}

/// Full valuation of a portfolio at read time.
///
/// Derived entirely from the ledger, the cash balance and live prices;
/// only `current_value` is written back to the portfolio row, as a cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub initial_investment: Decimal,
    pub cash_balance: Decimal,
    /// Market value of all priced holdings.
    pub holdings_value: Decimal,
    /// holdings_value + cash_balance.
    pub current_value: Decimal,
    /// Net cost basis across all current holdings.
    pub total_invested: Decimal,
    pub total_profit: Decimal,
    pub total_profit_percentage: Decimal,
    pub holdings: Vec<ValuedHolding>,
    pub created_at: NaiveDateTime,
}
