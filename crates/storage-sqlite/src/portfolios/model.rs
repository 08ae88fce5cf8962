//! Database model for portfolios.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use stockfolio_core::portfolios::Portfolio;

use crate::utils::parse_decimal;

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PortfolioDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub initial_investment: String,
    pub cash_balance: String,
    pub current_value: String,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Portfolio> for PortfolioDB {
    fn from(portfolio: Portfolio) -> Self {
        Self {
            id: portfolio.id,
            user_id: portfolio.user_id,
            name: portfolio.name,
            description: portfolio.description,
            initial_investment: portfolio.initial_investment.to_string(),
            cash_balance: portfolio.cash_balance.to_string(),
            current_value: portfolio.current_value.to_string(),
            is_active: portfolio.is_active,
            created_at: portfolio.created_at,
            updated_at: portfolio.updated_at,
        }
    }
}

impl From<PortfolioDB> for Portfolio {
    fn from(row: PortfolioDB) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description,
            initial_investment: parse_decimal(&row.initial_investment, "initial_investment"),
            cash_balance: parse_decimal(&row.cash_balance, "cash_balance"),
            current_value: parse_decimal(&row.current_value, "current_value"),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
