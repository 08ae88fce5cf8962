//! Transaction ledger domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Ledger entry kind. Only BUY and SELL move shares and cash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "BUY" => Ok(TransactionType::Buy),
            "SELL" => Ok(TransactionType::Sell),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid transaction type: {}",
                other
            )))),
        }
    }
}

/// Domain model for a committed ledger entry.
///
/// `total_amount` is a historical fact captured at write time
/// (quantity * price + fees); it is never recomputed from a live price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub portfolio_id: String,
    pub stock_symbol: String,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total_amount: Decimal,
    pub fees: Decimal,
    pub notes: Option<String>,
    pub transaction_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Transaction {
    /// Signed effect of this entry on the portfolio's cash balance.
    pub fn cash_delta(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Buy => -self.total_amount,
            TransactionType::Sell => self.total_amount,
        }
    }

    /// Signed effect on the share count of this entry's symbol.
    pub fn share_delta(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Buy => self.quantity,
            TransactionType::Sell => -self.quantity,
        }
    }

    /// Signed effect on the cost basis of this entry's symbol.
    pub fn invested_delta(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Buy => self.total_amount,
            TransactionType::Sell => -self.total_amount,
        }
    }
}

/// Input model for appending a ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub stock_symbol: String,
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    pub price: Decimal,
    #[serde(default)]
    pub fees: Decimal,
    pub notes: Option<String>,
    /// Defaults to "now" when omitted. Accepted with an explicit offset
    /// (RFC 3339) and stored as UTC.
    pub transaction_date: Option<DateTime<Utc>>,
}

impl NewTransaction {
    /// Validates the request before any database work happens.
    pub fn validate(&self) -> Result<()> {
        if self.stock_symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "stockSymbol".to_string(),
            )));
        }
        if self.quantity <= Decimal::ZERO || self.price <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Quantity and price must be positive".to_string(),
            )));
        }
        if self.fees < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Fees cannot be negative".to_string(),
            )));
        }
        Ok(())
    }

    /// Ticker in canonical uppercase form.
    pub fn symbol(&self) -> String {
        self.stock_symbol.trim().to_uppercase()
    }

    /// The write-once economic total for this entry.
    pub fn total_amount(&self) -> Decimal {
        self.quantity * self.price + self.fees
    }
}
