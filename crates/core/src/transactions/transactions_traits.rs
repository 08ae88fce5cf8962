//! Transaction ledger repository and service traits.

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use super::transactions_model::{NewTransaction, Transaction};
use crate::errors::Result;

/// Contract for ledger persistence.
///
/// The `*_in_transaction` methods run inside a write-actor job on the
/// caller's connection; they must not open or commit transactions of
/// their own.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Lists a portfolio's ledger, most recent transaction date first.
    fn list_by_portfolio(&self, portfolio_id: &str) -> Result<Vec<Transaction>>;

    fn get_in_transaction(
        &self,
        transaction_id: &str,
        portfolio_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction>;

    fn insert_in_transaction(
        &self,
        transaction: Transaction,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction>;

    fn delete_in_transaction(
        &self,
        transaction_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<()>;

    /// Net buy-minus-sell share count for one symbol, read under the
    /// caller's transaction so concurrent appends cannot skew the check.
    fn owned_shares_in_transaction(
        &self,
        portfolio_id: &str,
        symbol: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Decimal>;
}

/// Contract for ledger operations with invariants enforced.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    fn get_transactions(&self, portfolio_id: &str, user_id: &str) -> Result<Vec<Transaction>>;

    /// Appends a validated entry and applies its cash effect atomically.
    async fn create_transaction(
        &self,
        portfolio_id: &str,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;

    /// Deletes an entry, reversing its cash effect atomically.
    async fn delete_transaction(
        &self,
        transaction_id: &str,
        portfolio_id: &str,
        user_id: &str,
    ) -> Result<Transaction>;
}
