use std::sync::Arc;

use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::portfolios_model::{NewPortfolio, Portfolio, PortfolioUpdate};
use super::portfolios_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use crate::db::WriteHandle;
use crate::errors::{Error, Result, ValidationError};
use crate::transactions::LedgerError;

/// Service for managing portfolio accounts.
pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    writer: WriteHandle,
}

impl PortfolioService {
    pub fn new(repository: Arc<dyn PortfolioRepositoryTrait>, writer: WriteHandle) -> Self {
        Self { repository, writer }
    }

    fn validate_amount(amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Amount must be positive".to_string(),
            )));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn create_portfolio(
        &self,
        user_id: &str,
        new_portfolio: NewPortfolio,
    ) -> Result<Portfolio> {
        new_portfolio.validate()?;

        let now = Utc::now().naive_utc();
        let portfolio = Portfolio {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_portfolio.name.trim().to_string(),
            description: new_portfolio.description,
            initial_investment: new_portfolio.initial_investment,
            // A new portfolio starts fully in cash.
            cash_balance: new_portfolio.initial_investment,
            current_value: new_portfolio.initial_investment,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        debug!("Creating portfolio '{}' for user {}", portfolio.name, user_id);
        self.repository.create(portfolio).await
    }

    fn get_portfolio(&self, portfolio_id: &str, user_id: &str) -> Result<Portfolio> {
        self.repository.get_by_id(portfolio_id, user_id)
    }

    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        self.repository.list_by_user(user_id)
    }

    async fn update_portfolio(&self, user_id: &str, update: PortfolioUpdate) -> Result<Portfolio> {
        update.validate()?;
        self.repository.update(update, user_id).await
    }

    async fn delete_portfolio(&self, portfolio_id: &str, user_id: &str) -> Result<()> {
        self.repository.delete(portfolio_id, user_id).await?;
        Ok(())
    }

    async fn add_funds(
        &self,
        portfolio_id: &str,
        user_id: &str,
        amount: Decimal,
    ) -> Result<Portfolio> {
        Self::validate_amount(amount)?;

        let repository = self.repository.clone();
        let portfolio_id = portfolio_id.to_string();
        let user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let portfolio = repository.get_for_update(&portfolio_id, &user_id, conn)?;
                let cash_balance = portfolio.cash_balance + amount;
                let current_value = portfolio.current_value + amount;
                repository.set_balances_in_transaction(
                    &portfolio_id,
                    cash_balance,
                    current_value,
                    conn,
                )?;
                Ok(Portfolio {
                    cash_balance,
                    current_value,
                    ..portfolio
                })
            })
            .await
    }

    async fn withdraw_funds(
        &self,
        portfolio_id: &str,
        user_id: &str,
        amount: Decimal,
    ) -> Result<Portfolio> {
        Self::validate_amount(amount)?;

        let repository = self.repository.clone();
        let portfolio_id = portfolio_id.to_string();
        let user_id = user_id.to_string();

        self.writer
            .exec(move |conn| {
                let portfolio = repository.get_for_update(&portfolio_id, &user_id, conn)?;
                if portfolio.cash_balance < amount {
                    return Err(LedgerError::InsufficientFunds {
                        available: portfolio.cash_balance,
                        required: amount,
                    }
                    .into());
                }
                let cash_balance = portfolio.cash_balance - amount;
                let current_value = portfolio.current_value - amount;
                repository.set_balances_in_transaction(
                    &portfolio_id,
                    cash_balance,
                    current_value,
                    conn,
                )?;
                Ok(Portfolio {
                    cash_balance,
                    current_value,
                    ..portfolio
                })
            })
            .await
    }
}
