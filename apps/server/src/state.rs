use std::sync::Arc;

use stockfolio_core::holdings::{HoldingsService, HoldingsServiceTrait};
use stockfolio_core::market_data::providers::YahooProvider;
use stockfolio_core::market_data::{MarketDataService, MarketDataServiceTrait};
use stockfolio_core::portfolios::{PortfolioService, PortfolioServiceTrait};
use stockfolio_core::transactions::{TransactionService, TransactionServiceTrait};
use stockfolio_core::valuation::{ValuationService, ValuationServiceTrait};
use stockfolio_core::watchlists::{WatchlistService, WatchlistServiceTrait};
use stockfolio_storage_sqlite::portfolios::PortfolioRepository;
use stockfolio_storage_sqlite::quotes::QuoteRepository;
use stockfolio_storage_sqlite::transactions::TransactionRepository;
use stockfolio_storage_sqlite::watchlists::WatchlistRepository;
use stockfolio_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

use crate::config::Config;

/// Shared service handles for the request handlers.
pub struct AppState {
    pub portfolio_service: Arc<dyn PortfolioServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub holdings_service: Arc<dyn HoldingsServiceTrait>,
    pub valuation_service: Arc<dyn ValuationServiceTrait>,
    pub market_data_service: Arc<dyn MarketDataServiceTrait>,
    pub watchlist_service: Arc<dyn WatchlistServiceTrait>,
    pub jwt_secret: String,
}

/// Opens the database, spawns the writer actor and wires every service.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.data_dir)?;
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(pool.clone());

    let portfolio_repository = Arc::new(PortfolioRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone()));
    let quote_repository = Arc::new(QuoteRepository::new(pool.clone(), writer.clone()));
    let watchlist_repository = Arc::new(WatchlistRepository::new(pool.clone(), writer.clone()));

    let market_data_service = Arc::new(MarketDataService::new(
        quote_repository,
        Arc::new(YahooProvider::new()?),
    ));

    Ok(Arc::new(AppState {
        portfolio_service: Arc::new(PortfolioService::new(
            portfolio_repository.clone(),
            writer.clone(),
        )),
        transaction_service: Arc::new(TransactionService::new(
            portfolio_repository.clone(),
            transaction_repository.clone(),
            writer,
        )),
        holdings_service: Arc::new(HoldingsService::new(
            portfolio_repository.clone(),
            transaction_repository.clone(),
        )),
        valuation_service: Arc::new(ValuationService::new(
            portfolio_repository,
            transaction_repository,
            market_data_service.clone(),
        )),
        market_data_service,
        watchlist_service: Arc::new(WatchlistService::new(watchlist_repository)),
        jwt_secret: config.jwt_secret.clone(),
    }))
}
