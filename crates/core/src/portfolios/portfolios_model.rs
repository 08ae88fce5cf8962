//! Portfolio domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Domain model representing a portfolio.
///
/// `cash_balance` and the ledger are the durable facts; `current_value`
/// is only a cached snapshot written back by the valuation service and is
/// recomputed on every valuation read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Immutable after creation.
    pub initial_investment: Decimal,
    pub cash_balance: Decimal,
    pub current_value: Decimal,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a new portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub initial_investment: Decimal,
}

impl NewPortfolio {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Portfolio name cannot be empty".to_string(),
            )));
        }
        if self.initial_investment < Decimal::ZERO {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Initial investment cannot be negative".to_string(),
            )));
        }
        Ok(())
    }
}

/// Input model for updating a portfolio's descriptive fields.
///
/// Economic fields (initial investment, balances) are deliberately absent:
/// they change only through fund operations and the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdate {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl PortfolioUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "id".to_string(),
            )));
        }
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Portfolio name cannot be empty".to_string(),
                )));
            }
        }
        Ok(())
    }
}
