pub mod transactions_errors;
pub mod transactions_model;
pub mod transactions_service;
pub mod transactions_traits;


pub use transactions_errors::LedgerError;
pub use transactions_model::{NewTransaction, Transaction, TransactionType};
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
