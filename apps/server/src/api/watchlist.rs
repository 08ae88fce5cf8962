use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use stockfolio_core::market_data::Quote;
use stockfolio_core::watchlists::WatchlistItem;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WatchlistEntry {
    #[serde(flatten)]
    item: WatchlistItem,
    /// Latest quote when one can be resolved; watchlists stay readable
    /// through provider outages.
    quote: Option<Quote>,
}

async fn get_watchlist(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<WatchlistEntry>>> {
    let items = state.watchlist_service.get_watchlist(&user.user_id)?;

    let symbols: Vec<String> = items.iter().map(|item| item.symbol.clone()).collect();
    let mut quotes = state.market_data_service.get_quotes(&symbols).await?;

    let entries = items
        .into_iter()
        .map(|item| {
            let quote = quotes.remove(&item.symbol);
            WatchlistEntry { item, quote }
        })
        .collect();

    Ok(Json(entries))
}

#[derive(Deserialize)]
struct AddSymbolBody {
    symbol: String,
}

async fn add_symbol(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(body): Json<AddSymbolBody>,
) -> ApiResult<(StatusCode, Json<WatchlistItem>)> {
    let item = state
        .watchlist_service
        .add_symbol(&user.user_id, &body.symbol)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn remove_symbol(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(symbol): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .watchlist_service
        .remove_symbol(&user.user_id, &symbol)
        .await?;
    Ok(Json(
        serde_json::json!({ "message": "Symbol removed from watchlist" }),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/watchlist", get(get_watchlist).post(add_symbol))
        .route("/watchlist/{symbol}", delete(remove_symbol))
}
