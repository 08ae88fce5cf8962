use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use stockfolio_core::db::{get_connection, DbPool, WriteHandle};
use stockfolio_core::errors::Result;
use stockfolio_core::market_data::{Quote, QuoteRepositoryTrait};

use super::model::QuoteDB;
use crate::schema::quotes;
use crate::schema::quotes::dsl::*;

/// Repository for the quote cache.
pub struct QuoteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl QuoteRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl QuoteRepositoryTrait for QuoteRepository {
    fn get_quote(&self, quote_symbol: &str) -> Result<Option<Quote>> {
        let mut conn = get_connection(&self.pool)?;

        let row = quotes
            .select(QuoteDB::as_select())
            .find(quote_symbol)
            .first::<QuoteDB>(&mut conn)
            .optional()?;

        Ok(row.map(Quote::from))
    }

    fn get_quotes(&self, symbols: &[String]) -> Result<Vec<Quote>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = quotes
            .select(QuoteDB::as_select())
            .filter(symbol.eq_any(symbols))
            .load::<QuoteDB>(&mut conn)?;

        Ok(rows.into_iter().map(Quote::from).collect())
    }

    async fn upsert_quote(&self, quote: Quote) -> Result<Quote> {
        self.writer
            .exec(move |conn| {
                let row: QuoteDB = quote.into();
                diesel::insert_into(quotes::table)
                    .values(&row)
                    .on_conflict(symbol)
                    .do_update()
                    .set(&row)
                    .execute(conn)?;
                Ok(row.into())
            })
            .await
    }
}
