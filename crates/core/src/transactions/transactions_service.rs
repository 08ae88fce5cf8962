use std::sync::Arc;

use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::transactions_errors::LedgerError;
use super::transactions_model::{NewTransaction, Transaction, TransactionType};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::db::WriteHandle;
use crate::errors::Result;
use crate::portfolios::PortfolioRepositoryTrait;

/// Service enforcing the ledger invariants.
///
/// Every mutation is submitted as one write-actor job, so the
/// check-then-write sequence runs atomically and serialized against all
/// other mutations: two concurrent sells cannot both pass the owned-shares
/// check against stale data.
pub struct TransactionService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    writer: WriteHandle,
}

impl TransactionService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        writer: WriteHandle,
    ) -> Self {
        Self {
            portfolio_repository,
            transaction_repository,
            writer,
        }
    }
}

#[async_trait::async_trait]
impl TransactionServiceTrait for TransactionService {
    fn get_transactions(&self, portfolio_id: &str, user_id: &str) -> Result<Vec<Transaction>> {
        self.portfolio_repository.get_by_id(portfolio_id, user_id)?;
        self.transaction_repository.list_by_portfolio(portfolio_id)
    }

    async fn create_transaction(
        &self,
        portfolio_id: &str,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        new_transaction.validate()?;

        let now = Utc::now().naive_utc();
        let entry = Transaction {
            id: Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            stock_symbol: new_transaction.symbol(),
            transaction_type: new_transaction.transaction_type,
            quantity: new_transaction.quantity,
            price: new_transaction.price,
            total_amount: new_transaction.total_amount(),
            fees: new_transaction.fees,
            notes: new_transaction.notes,
            transaction_date: new_transaction
                .transaction_date
                .map(|date| date.naive_utc())
                .unwrap_or(now),
            created_at: now,
            updated_at: now,
        };

        debug!(
            "Appending {} {} x{} to portfolio {}",
            entry.transaction_type, entry.stock_symbol, entry.quantity, portfolio_id
        );

        let portfolios = self.portfolio_repository.clone();
        let ledger = self.transaction_repository.clone();
        let portfolio_id = portfolio_id.to_string();
        let user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let portfolio = portfolios.get_for_update(&portfolio_id, &user_id, conn)?;

                match entry.transaction_type {
                    TransactionType::Sell => {
                        let owned = ledger.owned_shares_in_transaction(
                            &portfolio_id,
                            &entry.stock_symbol,
                            conn,
                        )?;
                        if owned < entry.quantity {
                            return Err(LedgerError::InsufficientShares {
                                symbol: entry.stock_symbol.clone(),
                                owned,
                                requested: entry.quantity,
                            }
                            .into());
                        }
                    }
                    TransactionType::Buy => {
                        if portfolio.cash_balance < entry.total_amount {
                            return Err(LedgerError::InsufficientFunds {
                                available: portfolio.cash_balance,
                                required: entry.total_amount,
                            }
                            .into());
                        }
                    }
                }

                let new_cash = portfolio.cash_balance + entry.cash_delta();
                let inserted = ledger.insert_in_transaction(entry, conn)?;
                portfolios.set_cash_in_transaction(&portfolio_id, new_cash, conn)?;
                Ok(inserted)
            })
            .await
    }

    async fn delete_transaction(
        &self,
        transaction_id: &str,
        portfolio_id: &str,
        user_id: &str,
    ) -> Result<Transaction> {
        let portfolios = self.portfolio_repository.clone();
        let ledger = self.transaction_repository.clone();
        let transaction_id = transaction_id.to_string();
        let portfolio_id = portfolio_id.to_string();
        let user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let portfolio = portfolios.get_for_update(&portfolio_id, &user_id, conn)?;
                let entry = ledger.get_in_transaction(&transaction_id, &portfolio_id, conn)?;

                // Reversing a BUY refunds cash; reversing a SELL claws the
                // proceeds back and must not leave the balance negative.
                let new_cash = portfolio.cash_balance - entry.cash_delta();
                if new_cash < Decimal::ZERO {
                    return Err(LedgerError::InconsistentState(format!(
                        "Cannot delete sell transaction {}: insufficient cash to revert",
                        entry.id
                    ))
                    .into());
                }

                ledger.delete_in_transaction(&entry.id, conn)?;
                portfolios.set_cash_in_transaction(&portfolio_id, new_cash, conn)?;
                Ok(entry)
            })
            .await
    }
}
