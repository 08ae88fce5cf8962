//! Watchlist repository and service traits.

use async_trait::async_trait;

use super::watchlists_model::WatchlistItem;
use crate::errors::Result;

#[async_trait]
pub trait WatchlistRepositoryTrait: Send + Sync {
    fn list_by_user(&self, user_id: &str) -> Result<Vec<WatchlistItem>>;

    /// Inserts the item; a duplicate (user, symbol) pair surfaces as a
    /// unique-constraint violation.
    async fn insert(&self, item: WatchlistItem) -> Result<WatchlistItem>;

    /// Removes one symbol, returning the number of deleted rows.
    async fn delete(&self, user_id: &str, symbol: &str) -> Result<usize>;
}

#[async_trait]
pub trait WatchlistServiceTrait: Send + Sync {
    fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>>;

    async fn add_symbol(&self, user_id: &str, symbol: &str) -> Result<WatchlistItem>;

    async fn remove_symbol(&self, user_id: &str, symbol: &str) -> Result<()>;
}
