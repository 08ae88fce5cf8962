// Table definitions for the Stockfolio schema. Monetary and share
// quantities are stored as TEXT and parsed into `rust_decimal::Decimal`
// by the row models.

diesel::table! {
    portfolios (id) {
        id -> Text,
        user_id -> Text,
        name -> Text,
        description -> Nullable<Text>,
        initial_investment -> Text,
        cash_balance -> Text,
        current_value -> Text,
        is_active -> Bool,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    transactions (id) {
        id -> Text,
        portfolio_id -> Text,
        stock_symbol -> Text,
        transaction_type -> Text,
        quantity -> Text,
        price -> Text,
        total_amount -> Text,
        fees -> Text,
        notes -> Nullable<Text>,
        transaction_date -> Timestamp,
        created_at -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    quotes (symbol) {
        symbol -> Text,
        company_name -> Nullable<Text>,
        price -> Text,
        previous_close -> Nullable<Text>,
        as_of -> Timestamp,
        updated_at -> Timestamp,
    }
}

diesel::table! {
    watchlist_items (id) {
        id -> Text,
        user_id -> Text,
        symbol -> Text,
        created_at -> Timestamp,
    }
}

diesel::joinable!(transactions -> portfolios (portfolio_id));

diesel::allow_tables_to_appear_in_same_query!(portfolios, transactions, quotes, watchlist_items,);
