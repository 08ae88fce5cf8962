use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::watchlists_model::WatchlistItem;
use super::watchlists_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
use crate::errors::{DatabaseError, Error, Result, ValidationError};

/// Service for managing a user's watchlist.
pub struct WatchlistService {
    repository: Arc<dyn WatchlistRepositoryTrait>,
}

impl WatchlistService {
    pub fn new(repository: Arc<dyn WatchlistRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn normalize_symbol(symbol: &str) -> Result<String> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        Ok(symbol)
    }
}

#[async_trait]
impl WatchlistServiceTrait for WatchlistService {
    fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>> {
        self.repository.list_by_user(user_id)
    }

    async fn add_symbol(&self, user_id: &str, symbol: &str) -> Result<WatchlistItem> {
        let symbol = Self::normalize_symbol(symbol)?;
        let item = WatchlistItem {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            symbol: symbol.clone(),
            created_at: Utc::now().naive_utc(),
        };

        self.repository.insert(item).await.map_err(|e| match e {
            Error::Database(DatabaseError::UniqueViolation(_)) => {
                Error::ConstraintViolation(format!("{} is already on the watchlist", symbol))
            }
            other => other,
        })
    }

    async fn remove_symbol(&self, user_id: &str, symbol: &str) -> Result<()> {
        let symbol = Self::normalize_symbol(symbol)?;
        let deleted = self.repository.delete(user_id, &symbol).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!(
                "{} is not on the watchlist",
                symbol
            )));
        }
        Ok(())
    }
}
