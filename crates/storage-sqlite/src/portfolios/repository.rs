use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use rust_decimal::Decimal;

use stockfolio_core::db::{get_connection, DbPool, WriteHandle};
use stockfolio_core::errors::{Error, Result};
use stockfolio_core::portfolios::{Portfolio, PortfolioRepositoryTrait, PortfolioUpdate};

use super::model::PortfolioDB;
use crate::schema::portfolios;
use crate::schema::portfolios::dsl::*;

/// Repository for managing portfolio rows.
pub struct PortfolioRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn find_owned(
        portfolio_id: &str,
        owner_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Portfolio> {
        let row = portfolios
            .select(PortfolioDB::as_select())
            .filter(id.eq(portfolio_id))
            .filter(user_id.eq(owner_id))
            .first::<PortfolioDB>(conn)
            .optional()?;

        row.map(Portfolio::from)
            .ok_or_else(|| Error::not_found("Portfolio not found"))
    }
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    async fn create(&self, portfolio: Portfolio) -> Result<Portfolio> {
        self.writer
            .exec(move |conn| {
                let row: PortfolioDB = portfolio.into();
                diesel::insert_into(portfolios::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(row.into())
            })
            .await
    }

    fn get_by_id(&self, portfolio_id: &str, owner_id: &str) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;
        Self::find_owned(portfolio_id, owner_id, &mut conn)
    }

    fn list_by_user(&self, owner_id: &str) -> Result<Vec<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = portfolios
            .select(PortfolioDB::as_select())
            .filter(user_id.eq(owner_id))
            .order(created_at.desc())
            .load::<PortfolioDB>(&mut conn)?;

        Ok(rows.into_iter().map(Portfolio::from).collect())
    }

    async fn update(&self, update: PortfolioUpdate, owner_id: &str) -> Result<Portfolio> {
        let owner_id = owner_id.to_string();

        self.writer
            .exec(move |conn| {
                let mut existing = Self::find_owned(&update.id, &owner_id, conn)?;

                if let Some(new_name) = update.name {
                    existing.name = new_name.trim().to_string();
                }
                if update.description.is_some() {
                    existing.description = update.description;
                }
                existing.updated_at = Utc::now().naive_utc();

                let row: PortfolioDB = existing.into();
                diesel::update(portfolios.find(&row.id))
                    .set(&row)
                    .execute(conn)?;

                Ok(row.into())
            })
            .await
    }

    async fn delete(&self, portfolio_id: &str, owner_id: &str) -> Result<usize> {
        let portfolio_id = portfolio_id.to_string();
        let owner_id = owner_id.to_string();

        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    portfolios
                        .filter(id.eq(&portfolio_id))
                        .filter(user_id.eq(&owner_id)),
                )
                .execute(conn)?;

                if affected == 0 {
                    return Err(Error::not_found("Portfolio not found"));
                }
                Ok(affected)
            })
            .await
    }

    fn get_for_update(
        &self,
        portfolio_id: &str,
        owner_id: &str,
        conn: &mut SqliteConnection,
    ) -> Result<Portfolio> {
        Self::find_owned(portfolio_id, owner_id, conn)
    }

    fn set_cash_in_transaction(
        &self,
        portfolio_id: &str,
        new_cash_balance: Decimal,
        conn: &mut SqliteConnection,
    ) -> Result<()> {
        diesel::update(portfolios.find(portfolio_id))
            .set((
                cash_balance.eq(new_cash_balance.to_string()),
                updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;
        Ok(())
    }

    fn set_balances_in_transaction(
        &self,
        portfolio_id: &str,
        new_cash_balance: Decimal,
        new_current_value: Decimal,
        conn: &mut SqliteConnection,
    ) -> Result<()> {
        diesel::update(portfolios.find(portfolio_id))
            .set((
                cash_balance.eq(new_cash_balance.to_string()),
                current_value.eq(new_current_value.to_string()),
                updated_at.eq(Utc::now().naive_utc()),
            ))
            .execute(conn)?;
        Ok(())
    }

    async fn save_current_value(
        &self,
        portfolio_id: &str,
        new_current_value: Decimal,
    ) -> Result<()> {
        let portfolio_id = portfolio_id.to_string();

        self.writer
            .exec(move |conn| {
                diesel::update(portfolios.find(&portfolio_id))
                    .set((
                        current_value.eq(new_current_value.to_string()),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)?;
                Ok(())
            })
            .await
    }
}
