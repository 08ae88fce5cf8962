use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};

use stockfolio_core::transactions::{NewTransaction, Transaction};

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(portfolio_id): Path<String>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let transactions = state
        .transaction_service
        .get_transactions(&portfolio_id, &user.user_id)?;
    Ok(Json(transactions))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(portfolio_id): Path<String>,
    Json(body): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let transaction = state
        .transaction_service
        .create_transaction(&portfolio_id, &user.user_id, body)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path((portfolio_id, transaction_id)): Path<(String, String)>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .transaction_service
        .delete_transaction(&transaction_id, &portfolio_id, &user.user_id)
        .await?;
    Ok(Json(
        serde_json::json!({ "message": "Transaction deleted successfully" }),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/portfolios/{portfolio_id}/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/portfolios/{portfolio_id}/transactions/{id}",
            delete(delete_transaction),
        )
}
