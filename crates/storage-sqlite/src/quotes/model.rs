//! Database model for cached quotes.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use stockfolio_core::market_data::Quote;

use crate::utils::{parse_decimal, parse_decimal_opt};

#[derive(Queryable, Identifiable, Insertable, AsChangeset, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(primary_key(symbol))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuoteDB {
    pub symbol: String,
    pub company_name: Option<String>,
    pub price: String,
    pub previous_close: Option<String>,
    pub as_of: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Quote> for QuoteDB {
    fn from(quote: Quote) -> Self {
        Self {
            symbol: quote.symbol,
            company_name: quote.company_name,
            price: quote.price.to_string(),
            previous_close: quote.previous_close.map(|p| p.to_string()),
            as_of: quote.as_of,
            updated_at: quote.updated_at,
        }
    }
}

impl From<QuoteDB> for Quote {
    fn from(row: QuoteDB) -> Self {
        Self {
            symbol: row.symbol,
            company_name: row.company_name,
            price: parse_decimal(&row.price, "price"),
            previous_close: parse_decimal_opt(row.previous_close.as_deref(), "previous_close"),
            as_of: row.as_of,
            updated_at: row.updated_at,
        }
    }
}
