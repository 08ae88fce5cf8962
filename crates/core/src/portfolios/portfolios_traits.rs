//! Portfolio repository and service traits.

use async_trait::async_trait;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use super::portfolios_model::{NewPortfolio, Portfolio, PortfolioUpdate};
use crate::errors::Result;

/// Contract for portfolio persistence.
///
/// Every lookup is scoped by `(portfolio_id, user_id)`; a portfolio owned
/// by someone else is indistinguishable from a missing one (`NotFound`).
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    async fn create(&self, portfolio: Portfolio) -> Result<Portfolio>;

    fn get_by_id(&self, portfolio_id: &str, user_id: &str) -> Result<Portfolio>;

    /// Lists a user's portfolios, newest first.
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Portfolio>>;

    async fn update(&self, update: PortfolioUpdate, user_id: &str) -> Result<Portfolio>;

    /// Hard delete; the schema cascades to the portfolio's transactions.
    async fn delete(&self, portfolio_id: &str, user_id: &str) -> Result<usize>;

    /// Ownership-scoped load inside a write-actor job. The row re-read
    /// under the job's transaction is the authoritative state for any
    /// check-then-write sequence.
    fn get_for_update(
        &self,
        portfolio_id: &str,
        user_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Portfolio>;

    fn set_cash_in_transaction(
        &self,
        portfolio_id: &str,
        cash_balance: Decimal,
        conn: &mut SqliteConnection,
    ) -> Result<()>;

    fn set_balances_in_transaction(
        &self,
        portfolio_id: &str,
        cash_balance: Decimal,
        current_value: Decimal,
        conn: &mut SqliteConnection,
    ) -> Result<()>;

    /// Persists the valuation cache. Best-effort from the caller's point
    /// of view; still serialized through the writer.
    async fn save_current_value(&self, portfolio_id: &str, current_value: Decimal) -> Result<()>;
}

/// Contract for portfolio account operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    async fn create_portfolio(&self, user_id: &str, new_portfolio: NewPortfolio)
        -> Result<Portfolio>;

    fn get_portfolio(&self, portfolio_id: &str, user_id: &str) -> Result<Portfolio>;

    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>>;

    async fn update_portfolio(&self, user_id: &str, update: PortfolioUpdate) -> Result<Portfolio>;

    async fn delete_portfolio(&self, portfolio_id: &str, user_id: &str) -> Result<()>;

    /// Credits cash (and the cached value) with a positive amount.
    async fn add_funds(&self, portfolio_id: &str, user_id: &str, amount: Decimal)
        -> Result<Portfolio>;

    /// Debits cash; fails with `InsufficientFunds` when the balance is
    /// too low.
    async fn withdraw_funds(
        &self,
        portfolio_id: &str,
        user_id: &str,
        amount: Decimal,
    ) -> Result<Portfolio>;
}
