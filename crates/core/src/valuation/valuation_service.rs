use std::sync::Arc;

use async_trait::async_trait;
use log::warn;
use rust_decimal::Decimal;

use super::valuation_model::{PortfolioSnapshot, ValuedHolding};
use crate::errors::Result;
use crate::holdings::aggregate_holdings;
use crate::market_data::MarketDataServiceTrait;
use crate::portfolios::PortfolioRepositoryTrait;
use crate::transactions::TransactionRepositoryTrait;

#[async_trait]
pub trait ValuationServiceTrait: Send + Sync {
    /// Values an owned portfolio against the latest known prices.
    ///
    /// Holdings whose price cannot be resolved are flagged rather than
    /// failing the read. The recomputed total is written back onto the
    /// portfolio row as a cache, best-effort.
    async fn get_portfolio_valuation(
        &self,
        portfolio_id: &str,
        user_id: &str,
    ) -> Result<PortfolioSnapshot>;
}

pub struct ValuationService {
    portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
    transaction_repository: Arc<dyn TransactionRepositoryTrait>,
    market_data_service: Arc<dyn MarketDataServiceTrait>,
}

impl ValuationService {
    pub fn new(
        portfolio_repository: Arc<dyn PortfolioRepositoryTrait>,
        transaction_repository: Arc<dyn TransactionRepositoryTrait>,
        market_data_service: Arc<dyn MarketDataServiceTrait>,
    ) -> Self {
        Self {
            portfolio_repository,
            transaction_repository,
            market_data_service,
        }
    }
}

#[async_trait]
impl ValuationServiceTrait for ValuationService {
    async fn get_portfolio_valuation(
        &self,
        portfolio_id: &str,
        user_id: &str,
    ) -> Result<PortfolioSnapshot> {
        let portfolio = self.portfolio_repository.get_by_id(portfolio_id, user_id)?;
        let transactions = self.transaction_repository.list_by_portfolio(portfolio_id)?;
        let holdings = aggregate_holdings(&transactions);

        let symbols: Vec<String> = holdings.iter().map(|h| h.symbol.clone()).collect();
        let quotes = self.market_data_service.get_quotes(&symbols).await?;

        let mut holdings_value = Decimal::ZERO;
        let mut total_invested = Decimal::ZERO;
        let mut valued_holdings = Vec::with_capacity(holdings.len());

        for holding in holdings {
            total_invested += holding.total_invested;

            let valued = match quotes.get(&holding.symbol) {
                Some(quote) => {
                    let current_value = holding.total_shares * quote.price;
                    let profit = current_value - holding.total_invested;
                    let profit_percentage = if holding.total_invested > Decimal::ZERO {
                        profit / holding.total_invested * Decimal::ONE_HUNDRED
                    } else {
                        Decimal::ZERO
                    };
                    holdings_value += current_value;

                    ValuedHolding {
                        symbol: holding.symbol,
                        shares: holding.total_shares,
                        average_price: holding.average_price,
                        total_invested: holding.total_invested,
                        current_price: Some(quote.price),
                        current_value: Some(current_value),
                        profit: Some(profit),
                        profit_percentage: Some(profit_percentage),
                        price_unavailable: false,
                    }
                }
                None => ValuedHolding {
                    symbol: holding.symbol,
                    shares: holding.total_shares,
                    average_price: holding.average_price,
                    total_invested: holding.total_invested,
                    current_price: None,
                    current_value: None,
                    profit: None,
                    profit_percentage: None,
                    price_unavailable: true,
                },
            };
            valued_holdings.push(valued);
        }

        let current_value = holdings_value + portfolio.cash_balance;
        let total_profit = current_value - total_invested - portfolio.initial_investment;
        let total_profit_percentage = if portfolio.initial_investment > Decimal::ZERO {
            total_profit / portfolio.initial_investment * Decimal::ONE_HUNDRED
        } else {
            Decimal::ZERO
        };

        // Cache refresh only; the ledger and cash remain the authority.
        if let Err(e) = self
            .portfolio_repository
            .save_current_value(&portfolio.id, current_value)
            .await
        {
            warn!(
                "Failed to persist current value for portfolio {}: {}",
                portfolio.id, e
            );
        }

        Ok(PortfolioSnapshot {
            id: portfolio.id,
            name: portfolio.name,
            description: portfolio.description,
            initial_investment: portfolio.initial_investment,
            cash_balance: portfolio.cash_balance,
            holdings_value,
            current_value,
            total_invested,
            total_profit,
            total_profit_percentage,
            holdings: valued_holdings,
            created_at: portfolio.created_at,
        })
    }
}
