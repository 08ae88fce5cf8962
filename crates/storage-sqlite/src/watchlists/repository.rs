use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use stockfolio_core::db::{get_connection, DbPool, WriteHandle};
use stockfolio_core::errors::Result;
use stockfolio_core::watchlists::{WatchlistItem, WatchlistRepositoryTrait};

use super::model::WatchlistItemDB;
use crate::schema::watchlist_items;
use crate::schema::watchlist_items::dsl::*;

/// Repository for watchlist rows.
pub struct WatchlistRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl WatchlistRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl WatchlistRepositoryTrait for WatchlistRepository {
    fn list_by_user(&self, owner_id: &str) -> Result<Vec<WatchlistItem>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = watchlist_items
            .select(WatchlistItemDB::as_select())
            .filter(user_id.eq(owner_id))
            .order(symbol.asc())
            .load::<WatchlistItemDB>(&mut conn)?;

        Ok(rows.into_iter().map(WatchlistItem::from).collect())
    }

    async fn insert(&self, item: WatchlistItem) -> Result<WatchlistItem> {
        self.writer
            .exec(move |conn| {
                let row: WatchlistItemDB = item.into();
                diesel::insert_into(watchlist_items::table)
                    .values(&row)
                    .execute(conn)?;
                Ok(row.into())
            })
            .await
    }

    async fn delete(&self, owner_id: &str, item_symbol: &str) -> Result<usize> {
        let owner_id = owner_id.to_string();
        let item_symbol = item_symbol.to_string();

        self.writer
            .exec(move |conn| {
                let affected = diesel::delete(
                    watchlist_items
                        .filter(user_id.eq(&owner_id))
                        .filter(symbol.eq(&item_symbol)),
                )
                .execute(conn)?;
                Ok(affected)
            })
            .await
    }
}
