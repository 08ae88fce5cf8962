use std::sync::Arc;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use stockfolio_core::db::{get_connection, DbPool};
use stockfolio_core::errors::{Error, Result};
use stockfolio_core::transactions::{Transaction, TransactionRepositoryTrait, TransactionType};

use super::model::TransactionDB;
use crate::schema::transactions;
use crate::schema::transactions::dsl::*;
use crate::utils::parse_decimal;

/// Repository for the transaction ledger.
///
/// All mutations run on a connection handed in by the write actor; this
/// repository never opens a transaction of its own.
pub struct TransactionRepository {
    pool: Arc<DbPool>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    fn find_scoped(
        transaction_id: &str,
        owning_portfolio_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction> {
        let row = transactions
            .select(TransactionDB::as_select())
            .filter(id.eq(transaction_id))
            .filter(portfolio_id.eq(owning_portfolio_id))
            .first::<TransactionDB>(conn)
            .optional()?;

        row.map(Transaction::from)
            .ok_or_else(|| Error::not_found("Transaction not found"))
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn list_by_portfolio(&self, owning_portfolio_id: &str) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = transactions
            .select(TransactionDB::as_select())
            .filter(portfolio_id.eq(owning_portfolio_id))
            .order(transaction_date.desc())
            .load::<TransactionDB>(&mut conn)?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn get_in_transaction(
        &self,
        transaction_id: &str,
        owning_portfolio_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction> {
        Self::find_scoped(transaction_id, owning_portfolio_id, conn)
    }

    fn insert_in_transaction(
        &self,
        transaction: Transaction,
        conn: &mut SqliteConnection,
    ) -> Result<Transaction> {
        let row: TransactionDB = transaction.into();
        diesel::insert_into(transactions::table)
            .values(&row)
            .execute(conn)?;
        Ok(row.into())
    }

    fn delete_in_transaction(
        &self,
        transaction_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<()> {
        let affected =
            diesel::delete(transactions.filter(id.eq(transaction_id))).execute(conn)?;
        if affected == 0 {
            return Err(Error::not_found("Transaction not found"));
        }
        Ok(())
    }

    fn owned_shares_in_transaction(
        &self,
        owning_portfolio_id: &str,
        symbol: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Decimal> {
        // Quantities are stored as TEXT, so the buy-minus-sell fold
        // happens here rather than in SQL.
        let rows = transactions
            .select((transaction_type, quantity))
            .filter(portfolio_id.eq(owning_portfolio_id))
            .filter(stock_symbol.eq(symbol))
            .load::<(String, String)>(conn)?;

        let mut owned = Decimal::ZERO;
        for (row_type, row_quantity) in rows {
            let shares = parse_decimal(&row_quantity, "quantity");
            if row_type == TransactionType::Sell.as_str() {
                owned -= shares;
            } else {
                owned += shares;
            }
        }
        Ok(owned)
    }
}
