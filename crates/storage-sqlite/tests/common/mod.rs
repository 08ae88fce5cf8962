//! Shared fixture: a real temp-dir SQLite database with migrations
//! applied, a live write actor, and fully wired services.

use std::sync::Arc;

use tempfile::TempDir;

use stockfolio_core::db::{create_pool, spawn_writer};
use stockfolio_core::portfolios::{NewPortfolio, Portfolio, PortfolioService, PortfolioServiceTrait};
use stockfolio_core::transactions::TransactionService;
use stockfolio_storage_sqlite::portfolios::PortfolioRepository;
use stockfolio_storage_sqlite::quotes::QuoteRepository;
use stockfolio_storage_sqlite::transactions::TransactionRepository;
use stockfolio_storage_sqlite::watchlists::WatchlistRepository;
use stockfolio_storage_sqlite::{init, run_migrations};

pub struct TestContext {
    pub portfolio_repository: Arc<PortfolioRepository>,
    pub transaction_repository: Arc<TransactionRepository>,
    pub quote_repository: Arc<QuoteRepository>,
    pub watchlist_repository: Arc<WatchlistRepository>,
    pub portfolio_service: Arc<PortfolioService>,
    pub transaction_service: Arc<TransactionService>,
    // Held so the database files outlive the test.
    _data_dir: TempDir,
}

/// Builds a fresh database and service stack. Must be called from within
/// a tokio runtime (the write actor is a spawned task).
pub fn setup() -> TestContext {
    let data_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = init(data_dir.path().to_str().unwrap()).expect("Failed to initialize database");
    let pool = create_pool(&db_path).expect("Failed to create database pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer(pool.clone());

    let portfolio_repository = Arc::new(PortfolioRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let quote_repository = Arc::new(QuoteRepository::new(pool.clone(), writer.clone()));
    let watchlist_repository = Arc::new(WatchlistRepository::new(pool.clone(), writer.clone()));

    let portfolio_service = Arc::new(PortfolioService::new(
        portfolio_repository.clone(),
        writer.clone(),
    ));
    let transaction_service = Arc::new(TransactionService::new(
        portfolio_repository.clone(),
        transaction_repository.clone(),
        writer.clone(),
    ));

    TestContext {
        portfolio_repository,
        transaction_repository,
        quote_repository,
        watchlist_repository,
        portfolio_service,
        transaction_service,
        _data_dir: data_dir,
    }
}

/// Creates a portfolio for `user_id` funded with `initial_investment`.
pub async fn create_funded_portfolio(
    ctx: &TestContext,
    user_id: &str,
    initial_investment: rust_decimal::Decimal,
) -> Portfolio {
    ctx.portfolio_service
        .create_portfolio(
            user_id,
            NewPortfolio {
                name: "Test Portfolio".to_string(),
                description: None,
                initial_investment,
            },
        )
        .await
        .expect("Failed to create portfolio")
}
