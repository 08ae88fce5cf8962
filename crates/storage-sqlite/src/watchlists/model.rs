//! Database model for watchlist items.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use stockfolio_core::watchlists::WatchlistItem;

#[derive(Queryable, Identifiable, Insertable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::watchlist_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct WatchlistItemDB {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub created_at: NaiveDateTime,
}

impl From<WatchlistItem> for WatchlistItemDB {
    fn from(item: WatchlistItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            symbol: item.symbol,
            created_at: item.created_at,
        }
    }
}

impl From<WatchlistItemDB> for WatchlistItem {
    fn from(row: WatchlistItemDB) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            symbol: row.symbol,
            created_at: row.created_at,
        }
    }
}
