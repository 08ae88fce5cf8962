#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use diesel::sqlite::SqliteConnection;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::errors::{Error, Result};
    use crate::market_data::{MarketDataServiceTrait, Quote, QuoteSummary};
    use crate::portfolios::{Portfolio, PortfolioRepositoryTrait, PortfolioUpdate};
    use crate::transactions::{Transaction, TransactionRepositoryTrait, TransactionType};
    use crate::valuation::{ValuationService, ValuationServiceTrait};

    // --- Mock PortfolioRepository ---

    struct MockPortfolioRepository {
        portfolio: Portfolio,
        saved_values: Mutex<Vec<Decimal>>,
        fail_save: bool,
    }

    impl MockPortfolioRepository {
        fn new(portfolio: Portfolio) -> Self {
            Self {
                portfolio,
                saved_values: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing_save(portfolio: Portfolio) -> Self {
            Self {
                fail_save: true,
                ..Self::new(portfolio)
            }
        }
    }

    #[async_trait]
    impl PortfolioRepositoryTrait for MockPortfolioRepository {
        async fn create(&self, _portfolio: Portfolio) -> Result<Portfolio> {
            unimplemented!("Not needed for tests")
        }

        fn get_by_id(&self, portfolio_id: &str, user_id: &str) -> Result<Portfolio> {
            if self.portfolio.id == portfolio_id && self.portfolio.user_id == user_id {
                Ok(self.portfolio.clone())
            } else {
                Err(Error::not_found("Portfolio not found"))
            }
        }

        fn list_by_user(&self, _user_id: &str) -> Result<Vec<Portfolio>> {
            unimplemented!("Not needed for tests")
        }

        async fn update(&self, _update: PortfolioUpdate, _user_id: &str) -> Result<Portfolio> {
            unimplemented!("Not needed for tests")
        }

        async fn delete(&self, _portfolio_id: &str, _user_id: &str) -> Result<usize> {
            unimplemented!("Not needed for tests")
        }

        fn get_for_update(
            &self,
            _portfolio_id: &str,
            _user_id: &str,
            _conn: &mut SqliteConnection,
        ) -> Result<Portfolio> {
            unimplemented!("Not needed for tests")
        }

        fn set_cash_in_transaction(
            &self,
            _portfolio_id: &str,
            _cash_balance: Decimal,
            _conn: &mut SqliteConnection,
        ) -> Result<()> {
            unimplemented!("Not needed for tests")
        }

        fn set_balances_in_transaction(
            &self,
            _portfolio_id: &str,
            _cash_balance: Decimal,
            _current_value: Decimal,
            _conn: &mut SqliteConnection,
        ) -> Result<()> {
            unimplemented!("Not needed for tests")
        }

        async fn save_current_value(
            &self,
            _portfolio_id: &str,
            current_value: Decimal,
        ) -> Result<()> {
            if self.fail_save {
                return Err(Error::Repository("writer unavailable".to_string()));
            }
            self.saved_values.lock().unwrap().push(current_value);
            Ok(())
        }
    }

    // --- Mock TransactionRepository ---

    struct MockTransactionRepository {
        transactions: Vec<Transaction>,
    }

    impl TransactionRepositoryTrait for MockTransactionRepository {
        fn list_by_portfolio(&self, _portfolio_id: &str) -> Result<Vec<Transaction>> {
            Ok(self.transactions.clone())
        }

        fn get_in_transaction(
            &self,
            _transaction_id: &str,
            _portfolio_id: &str,
            _conn: &mut SqliteConnection,
        ) -> Result<Transaction> {
            unimplemented!("Not needed for tests")
        }

        fn insert_in_transaction(
            &self,
            _transaction: Transaction,
            _conn: &mut SqliteConnection,
        ) -> Result<Transaction> {
            unimplemented!("Not needed for tests")
        }

        fn delete_in_transaction(
            &self,
            _transaction_id: &str,
            _conn: &mut SqliteConnection,
        ) -> Result<()> {
            unimplemented!("Not needed for tests")
        }

        fn owned_shares_in_transaction(
            &self,
            _portfolio_id: &str,
            _symbol: &str,
            _conn: &mut SqliteConnection,
        ) -> Result<Decimal> {
            unimplemented!("Not needed for tests")
        }
    }

    // --- Mock MarketDataService ---

    struct MockMarketDataService {
        prices: HashMap<String, Decimal>,
    }

    impl MockMarketDataService {
        fn new(prices: &[(&str, Decimal)]) -> Self {
            Self {
                prices: prices.iter().map(|(s, p)| (s.to_string(), *p)).collect(),
            }
        }
    }

    #[async_trait]
    impl MarketDataServiceTrait for MockMarketDataService {
        async fn get_quote(&self, _symbol: &str) -> Result<Quote> {
            unimplemented!("Not needed for tests")
        }

        async fn get_quotes(&self, symbols: &[String]) -> Result<HashMap<String, Quote>> {
            let now = Utc::now().naive_utc();
            Ok(symbols
                .iter()
                .filter_map(|symbol| {
                    self.prices.get(symbol).map(|price| {
                        (
                            symbol.clone(),
                            Quote {
                                symbol: symbol.clone(),
                                company_name: None,
                                price: *price,
                                previous_close: None,
                                as_of: now,
                                updated_at: now,
                            },
                        )
                    })
                })
                .collect())
        }

        async fn search_symbols(&self, _query: &str) -> Result<Vec<QuoteSummary>> {
            Ok(vec![])
        }
    }

    // --- Fixtures ---

    fn portfolio(initial: Decimal, cash: Decimal) -> Portfolio {
        let now = Utc::now().naive_utc();
        Portfolio {
            id: "p1".to_string(),
            user_id: "u1".to_string(),
            name: "Growth".to_string(),
            description: None,
            initial_investment: initial,
            cash_balance: cash,
            current_value: cash,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn entry(
        symbol: &str,
        transaction_type: TransactionType,
        quantity: Decimal,
        price: Decimal,
    ) -> Transaction {
        let now = Utc::now().naive_utc();
        Transaction {
            id: uuid::Uuid::new_v4().to_string(),
            portfolio_id: "p1".to_string(),
            stock_symbol: symbol.to_string(),
            transaction_type,
            quantity,
            price,
            total_amount: quantity * price,
            fees: Decimal::ZERO,
            notes: None,
            transaction_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(
        repo: Arc<MockPortfolioRepository>,
        transactions: Vec<Transaction>,
        prices: &[(&str, Decimal)],
    ) -> ValuationService {
        ValuationService::new(
            repo,
            Arc::new(MockTransactionRepository { transactions }),
            Arc::new(MockMarketDataService::new(prices)),
        )
    }

    #[tokio::test]
    async fn values_holdings_against_live_prices() {
        let repo = Arc::new(MockPortfolioRepository::new(portfolio(
            dec!(1000),
            dec!(800),
        )));
        let ledger = vec![entry("AAPL", TransactionType::Buy, dec!(2), dec!(100))];
        let service = service(repo.clone(), ledger, &[("AAPL", dec!(120))]);

        let snapshot = service.get_portfolio_valuation("p1", "u1").await.unwrap();

        assert_eq!(snapshot.holdings.len(), 1);
        let holding = &snapshot.holdings[0];
        assert_eq!(holding.current_price, Some(dec!(120)));
        assert_eq!(holding.current_value, Some(dec!(240)));
        assert_eq!(holding.profit, Some(dec!(40)));
        assert_eq!(holding.profit_percentage, Some(dec!(20)));
        assert!(!holding.price_unavailable);

        assert_eq!(snapshot.holdings_value, dec!(240));
        assert_eq!(snapshot.current_value, dec!(1040));
        assert_eq!(snapshot.total_invested, dec!(200));
        // 1040 - 200 - 1000
        assert_eq!(snapshot.total_profit, dec!(-160));
        assert_eq!(snapshot.total_profit_percentage, dec!(-16));

        // The recomputed value was cached onto the portfolio row.
        assert_eq!(*repo.saved_values.lock().unwrap(), vec![dec!(1040)]);
    }

    #[tokio::test]
    async fn unpriced_holding_is_flagged_not_fatal() {
        let repo = Arc::new(MockPortfolioRepository::new(portfolio(
            dec!(1000),
            dec!(500),
        )));
        let ledger = vec![
            entry("AAPL", TransactionType::Buy, dec!(2), dec!(100)),
            entry("OBSCURE", TransactionType::Buy, dec!(10), dec!(30)),
        ];
        let service = service(repo, ledger, &[("AAPL", dec!(110))]);

        let snapshot = service.get_portfolio_valuation("p1", "u1").await.unwrap();

        let flagged = snapshot
            .holdings
            .iter()
            .find(|h| h.symbol == "OBSCURE")
            .unwrap();
        assert!(flagged.price_unavailable);
        assert_eq!(flagged.current_value, None);
        assert_eq!(flagged.profit, None);
        // Still reported with its ledger-derived fields.
        assert_eq!(flagged.shares, dec!(10));
        assert_eq!(flagged.total_invested, dec!(300));

        // Totals only include the priced holding.
        assert_eq!(snapshot.holdings_value, dec!(220));
        assert_eq!(snapshot.current_value, dec!(720));
        // Cost basis still counts every holding.
        assert_eq!(snapshot.total_invested, dec!(500));
    }

    #[tokio::test]
    async fn cache_write_failure_does_not_fail_the_read() {
        let repo = Arc::new(MockPortfolioRepository::failing_save(portfolio(
            dec!(1000),
            dec!(1000),
        )));
        let service = service(repo, vec![], &[]);

        let snapshot = service.get_portfolio_valuation("p1", "u1").await.unwrap();
        assert_eq!(snapshot.current_value, dec!(1000));
    }

    #[tokio::test]
    async fn zero_initial_investment_reports_zero_percentage() {
        let repo = Arc::new(MockPortfolioRepository::new(portfolio(
            Decimal::ZERO,
            dec!(50),
        )));
        let service = service(repo, vec![], &[]);

        let snapshot = service.get_portfolio_valuation("p1", "u1").await.unwrap();
        assert_eq!(snapshot.total_profit, dec!(50));
        assert_eq!(snapshot.total_profit_percentage, Decimal::ZERO);
    }

    #[tokio::test]
    async fn unknown_portfolio_is_not_found() {
        let repo = Arc::new(MockPortfolioRepository::new(portfolio(
            dec!(1000),
            dec!(1000),
        )));
        let service = service(repo, vec![], &[]);

        assert!(service.get_portfolio_valuation("p2", "u1").await.is_err());
        // Another user's portfolio reads the same as a missing one.
        assert!(service.get_portfolio_valuation("p1", "u2").await.is_err());
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let repo = Arc::new(MockPortfolioRepository::new(portfolio(
            dec!(1000),
            dec!(800),
        )));
        let ledger = vec![entry("AAPL", TransactionType::Buy, dec!(2), dec!(100))];
        let service = service(repo, ledger, &[("AAPL", dec!(120))]);

        let first = service.get_portfolio_valuation("p1", "u1").await.unwrap();
        let second = service.get_portfolio_valuation("p1", "u1").await.unwrap();

        assert_eq!(first.current_value, second.current_value);
        assert_eq!(first.holdings.len(), second.holdings.len());
        assert_eq!(first.total_profit, second.total_profit);
    }
}
