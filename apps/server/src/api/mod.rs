use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod portfolios;
mod stocks;
mod transactions;
mod watchlist;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(portfolios::router())
        .merge(transactions::router())
        .merge(stocks::router())
        .merge(watchlist::router());

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
