use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use stockfolio_core::holdings::Holding;
use stockfolio_core::portfolios::{NewPortfolio, Portfolio, PortfolioUpdate};
use stockfolio_core::valuation::PortfolioSnapshot;

use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::state::AppState;

async fn list_portfolios(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> ApiResult<Json<Vec<Portfolio>>> {
    let portfolios = state.portfolio_service.list_portfolios(&user.user_id)?;
    Ok(Json(portfolios))
}

async fn create_portfolio(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(body): Json<NewPortfolio>,
) -> ApiResult<(StatusCode, Json<Portfolio>)> {
    let portfolio = state
        .portfolio_service
        .create_portfolio(&user.user_id, body)
        .await?;
    Ok((StatusCode::CREATED, Json(portfolio)))
}

/// Portfolio details are served as a full valuation snapshot: holdings
/// priced against the latest quotes plus the cash balance.
async fn get_portfolio(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(portfolio_id): Path<String>,
) -> ApiResult<Json<PortfolioSnapshot>> {
    let snapshot = state
        .valuation_service
        .get_portfolio_valuation(&portfolio_id, &user.user_id)
        .await?;
    Ok(Json(snapshot))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePortfolioBody {
    name: Option<String>,
    description: Option<String>,
}

async fn update_portfolio(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(portfolio_id): Path<String>,
    Json(body): Json<UpdatePortfolioBody>,
) -> ApiResult<Json<Portfolio>> {
    let portfolio = state
        .portfolio_service
        .update_portfolio(
            &user.user_id,
            PortfolioUpdate {
                id: portfolio_id,
                name: body.name,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(portfolio))
}

async fn delete_portfolio(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(portfolio_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .portfolio_service
        .delete_portfolio(&portfolio_id, &user.user_id)
        .await?;
    Ok(Json(
        serde_json::json!({ "message": "Portfolio deleted successfully" }),
    ))
}

async fn get_holdings(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(portfolio_id): Path<String>,
) -> ApiResult<Json<Vec<Holding>>> {
    let holdings = state
        .holdings_service
        .compute_holdings(&portfolio_id, &user.user_id)?;
    Ok(Json(holdings))
}

#[derive(Deserialize)]
struct AmountBody {
    amount: Decimal,
}

async fn add_funds(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(portfolio_id): Path<String>,
    Json(body): Json<AmountBody>,
) -> ApiResult<Json<Portfolio>> {
    let portfolio = state
        .portfolio_service
        .add_funds(&portfolio_id, &user.user_id, body.amount)
        .await?;
    Ok(Json(portfolio))
}

async fn withdraw_funds(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Path(portfolio_id): Path<String>,
    Json(body): Json<AmountBody>,
) -> ApiResult<Json<Portfolio>> {
    let portfolio = state
        .portfolio_service
        .withdraw_funds(&portfolio_id, &user.user_id, body.amount)
        .await?;
    Ok(Json(portfolio))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolios", get(list_portfolios).post(create_portfolio))
        .route(
            "/portfolios/{id}",
            get(get_portfolio)
                .put(update_portfolio)
                .delete(delete_portfolio),
        )
        .route("/portfolios/{id}/holdings", get(get_holdings))
        .route("/portfolios/{id}/funds", post(add_funds))
        .route("/portfolios/{id}/withdraw", post(withdraw_funds))
}
