use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use stockfolio_core::errors::{DatabaseError, Error as CoreError};
use stockfolio_core::market_data::MarketDataError;
use stockfolio_core::transactions::LedgerError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Error responder translating the core taxonomy into HTTP statuses with
/// a `{"message": ...}` body.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let status = match &err {
            CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            CoreError::Database(DatabaseError::UniqueViolation(_))
            | CoreError::ConstraintViolation(_) => StatusCode::CONFLICT,
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            // Blocked reversals are a state conflict, not bad input.
            CoreError::Ledger(LedgerError::InconsistentState(_)) => StatusCode::CONFLICT,
            CoreError::Ledger(_) => StatusCode::BAD_REQUEST,
            CoreError::MarketData(MarketDataError::PriceUnavailable(_)) => StatusCode::NOT_FOUND,
            CoreError::MarketData(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Internal error: {}", err);
        }

        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}
