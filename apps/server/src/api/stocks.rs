use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use stockfolio_core::market_data::{Quote, QuoteSummary};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Deserialize)]
struct SearchParams {
    query: String,
}

async fn search_stocks(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<QuoteSummary>>> {
    let results = state
        .market_data_service
        .search_symbols(&params.query)
        .await?;
    Ok(Json(results))
}

async fn get_stock(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Path(symbol): Path<String>,
) -> ApiResult<Json<Quote>> {
    let quote = state.market_data_service.get_quote(&symbol).await?;
    Ok(Json(quote))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stocks/search", get(search_stocks))
        .route("/stocks/{symbol}", get(get_stock))
}
