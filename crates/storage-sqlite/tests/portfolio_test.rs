//! Portfolio account operations against a real database.

mod common;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use stockfolio_core::errors::{DatabaseError, Error};
use stockfolio_core::portfolios::{NewPortfolio, PortfolioServiceTrait, PortfolioUpdate};
use stockfolio_core::transactions::{
    LedgerError, NewTransaction, TransactionServiceTrait, TransactionType,
};

const USER: &str = "user-1";

#[tokio::test]
async fn a_new_portfolio_starts_fully_in_cash() {
    let ctx = common::setup();

    let portfolio = ctx
        .portfolio_service
        .create_portfolio(
            USER,
            NewPortfolio {
                name: "Retirement".to_string(),
                description: Some("Long-term".to_string()),
                initial_investment: dec!(2500),
            },
        )
        .await
        .unwrap();

    assert_eq!(portfolio.cash_balance, dec!(2500));
    assert_eq!(portfolio.current_value, dec!(2500));
    assert_eq!(portfolio.initial_investment, dec!(2500));
    assert!(portfolio.is_active);

    let reloaded = ctx.portfolio_service.get_portfolio(&portfolio.id, USER).unwrap();
    assert_eq!(reloaded.cash_balance, dec!(2500));
}

#[tokio::test]
async fn listing_is_scoped_per_user() {
    let ctx = common::setup();
    common::create_funded_portfolio(&ctx, USER, dec!(100)).await;
    common::create_funded_portfolio(&ctx, USER, dec!(200)).await;
    common::create_funded_portfolio(&ctx, "user-2", dec!(300)).await;

    assert_eq!(ctx.portfolio_service.list_portfolios(USER).unwrap().len(), 2);
    assert_eq!(
        ctx.portfolio_service.list_portfolios("user-2").unwrap().len(),
        1
    );
    assert!(ctx
        .portfolio_service
        .list_portfolios("user-3")
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn update_touches_only_descriptive_fields() {
    let ctx = common::setup();
    let portfolio = common::create_funded_portfolio(&ctx, USER, dec!(1000)).await;

    let updated = ctx
        .portfolio_service
        .update_portfolio(
            USER,
            PortfolioUpdate {
                id: portfolio.id.clone(),
                name: Some("Renamed".to_string()),
                description: Some("new description".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.description.as_deref(), Some("new description"));
    // Economic fields are untouched.
    assert_eq!(updated.initial_investment, dec!(1000));
    assert_eq!(updated.cash_balance, dec!(1000));
}

#[tokio::test]
async fn update_of_foreign_portfolio_is_not_found() {
    let ctx = common::setup();
    let portfolio = common::create_funded_portfolio(&ctx, USER, dec!(1000)).await;

    let err = ctx
        .portfolio_service
        .update_portfolio(
            "user-2",
            PortfolioUpdate {
                id: portfolio.id.clone(),
                name: Some("Hijacked".to_string()),
                description: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
}

#[tokio::test]
async fn add_and_withdraw_funds_move_cash_and_cached_value() {
    let ctx = common::setup();
    let portfolio = common::create_funded_portfolio(&ctx, USER, dec!(1000)).await;

    let after_add = ctx
        .portfolio_service
        .add_funds(&portfolio.id, USER, dec!(250))
        .await
        .unwrap();
    assert_eq!(after_add.cash_balance, dec!(1250));
    assert_eq!(after_add.current_value, dec!(1250));

    let after_withdraw = ctx
        .portfolio_service
        .withdraw_funds(&portfolio.id, USER, dec!(50))
        .await
        .unwrap();
    assert_eq!(after_withdraw.cash_balance, dec!(1200));
    assert_eq!(after_withdraw.current_value, dec!(1200));
}

#[tokio::test]
async fn overdrawing_a_withdrawal_is_rejected() {
    let ctx = common::setup();
    let portfolio = common::create_funded_portfolio(&ctx, USER, dec!(100)).await;

    let err = ctx
        .portfolio_service
        .withdraw_funds(&portfolio.id, USER, dec!(100.01))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Ledger(LedgerError::InsufficientFunds { .. })
    ));

    let reloaded = ctx.portfolio_service.get_portfolio(&portfolio.id, USER).unwrap();
    assert_eq!(reloaded.cash_balance, dec!(100));
}

#[tokio::test]
async fn fund_amounts_must_be_positive() {
    let ctx = common::setup();
    let portfolio = common::create_funded_portfolio(&ctx, USER, dec!(100)).await;

    for amount in [Decimal::ZERO, dec!(-10)] {
        assert!(matches!(
            ctx.portfolio_service
                .add_funds(&portfolio.id, USER, amount)
                .await
                .unwrap_err(),
            Error::Validation(_)
        ));
        assert!(matches!(
            ctx.portfolio_service
                .withdraw_funds(&portfolio.id, USER, amount)
                .await
                .unwrap_err(),
            Error::Validation(_)
        ));
    }
}

#[tokio::test]
async fn deleting_a_portfolio_cascades_to_its_ledger() {
    let ctx = common::setup();
    let portfolio = common::create_funded_portfolio(&ctx, USER, dec!(1000)).await;

    ctx.transaction_service
        .create_transaction(
            &portfolio.id,
            USER,
            NewTransaction {
                stock_symbol: "AAPL".to_string(),
                transaction_type: TransactionType::Buy,
                quantity: dec!(1),
                price: dec!(100),
                fees: Decimal::ZERO,
                notes: None,
                transaction_date: None,
            },
        )
        .await
        .unwrap();

    ctx.portfolio_service
        .delete_portfolio(&portfolio.id, USER)
        .await
        .unwrap();

    assert!(matches!(
        ctx.portfolio_service
            .get_portfolio(&portfolio.id, USER)
            .unwrap_err(),
        Error::Database(DatabaseError::NotFound(_))
    ));

    // The FK cascade removed the ledger rows with the portfolio.
    use stockfolio_core::transactions::TransactionRepositoryTrait;
    assert!(ctx
        .transaction_repository
        .list_by_portfolio(&portfolio.id)
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn deleting_a_missing_portfolio_is_not_found() {
    let ctx = common::setup();

    let err = ctx
        .portfolio_service
        .delete_portfolio("nope", USER)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));
}
