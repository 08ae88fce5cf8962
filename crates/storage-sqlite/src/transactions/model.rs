//! Database model for ledger entries.

use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use stockfolio_core::transactions::{Transaction, TransactionType};

use crate::utils::parse_decimal;

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub portfolio_id: String,
    pub stock_symbol: String,
    pub transaction_type: String,
    pub quantity: String,
    pub price: String,
    pub total_amount: String,
    pub fees: String,
    pub notes: Option<String>,
    pub transaction_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Transaction> for TransactionDB {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            portfolio_id: transaction.portfolio_id,
            stock_symbol: transaction.stock_symbol,
            transaction_type: transaction.transaction_type.as_str().to_string(),
            quantity: transaction.quantity.to_string(),
            price: transaction.price.to_string(),
            total_amount: transaction.total_amount.to_string(),
            fees: transaction.fees.to_string(),
            notes: transaction.notes,
            transaction_date: transaction.transaction_date,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}

impl From<TransactionDB> for Transaction {
    fn from(row: TransactionDB) -> Self {
        // Only the service layer writes rows, so the type column is
        // always BUY or SELL; anything else is hand-edited data.
        let transaction_type =
            TransactionType::from_str(&row.transaction_type).unwrap_or_else(|_| {
                log::error!(
                    "Transaction {} has unknown type '{}', reading as BUY",
                    row.id,
                    row.transaction_type
                );
                TransactionType::Buy
            });

        Self {
            id: row.id,
            portfolio_id: row.portfolio_id,
            stock_symbol: row.stock_symbol,
            transaction_type,
            quantity: parse_decimal(&row.quantity, "quantity"),
            price: parse_decimal(&row.price, "price"),
            total_amount: parse_decimal(&row.total_amount, "total_amount"),
            fees: parse_decimal(&row.fees, "fees"),
            notes: row.notes,
            transaction_date: row.transaction_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
