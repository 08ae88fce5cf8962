use std::collections::BTreeMap;
use std::sync::Arc;

use rust_decimal::Decimal;

use super::holdings_model::Holding;
use crate::errors::Result;
use crate::portfolios::PortfolioRepositoryTrait;
use crate::transactions::{Transaction, TransactionRepositoryTrait};

/// Folds a ledger into per-symbol holdings.
///
/// Pure function of its input: the same transaction set always yields the
/// same holdings. Positions that were fully exited (or carry an invalid
/// negative residual) are filtered out. Output is sorted by symbol so
/// repeated reads are identical.
pub fn aggregate_holdings(transactions: &[Transaction]) -> Vec<Holding> {
    let mut positions: BTreeMap<&str, (Decimal, Decimal)> = BTreeMap::new();

    for transaction in transactions {
        let entry = positions
            .entry(transaction.stock_symbol.as_str())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += transaction.share_delta();
        entry.1 += transaction.invested_delta();
    }

    positions
        .into_iter()
        .filter(|(_, (total_shares, _))| *total_shares > Decimal::ZERO)
        .map(|(symbol, (total_shares, total_invested))| Holding {
            symbol: symbol.to_string(),
            total_shares,
            total_invested,
            average_price: total_invested / total_shares,
        })
        .collect()
}

/// Contract for the holdings read model.
pub trait HoldingsServiceTrait: Send + Sync {
    /// Computes the current holdings for an owned portfolio.
    fn compute_holdings(&self, portfolio_id: &str, user_id: &str) -> Result<Vec<Holding>>;
}

/// Ownership-checking wrapper around [`aggregate_holdings`].
pub struct HoldingsService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
}

impl HoldingsService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    ) -> Self {
        Self {
            portfolio_repository,
            transaction_repository,
        }
    }
}

impl HoldingsServiceTrait for HoldingsService {
    fn compute_holdings(&self, portfolio_id: &str, user_id: &str) -> Result<Vec<Holding>> {
        self.portfolio_repository.get_by_id(portfolio_id, user_id)?;
        let transactions = self.transaction_repository.list_by_portfolio(portfolio_id)?;
        Ok(aggregate_holdings(&transactions))
    }
}
