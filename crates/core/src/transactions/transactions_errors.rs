//! Business-rule violations raised by the transaction ledger.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors produced while checking ledger invariants.
///
/// All of these are detected inside the atomic write job, before any row
/// is inserted or cash is moved; a violation rolls the whole job back.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Not enough shares of {symbol} to sell: owned {owned}, requested {requested}")]
    InsufficientShares {
        symbol: String,
        owned: Decimal,
        requested: Decimal,
    },

    #[error("Insufficient funds: available {available}, required {required}")]
    InsufficientFunds {
        available: Decimal,
        required: Decimal,
    },

    /// A reversal would violate a durable invariant (e.g. deleting a SELL
    /// whose proceeds were already spent would drive cash negative).
    #[error("Inconsistent state: {0}")]
    InconsistentState(String),
}
