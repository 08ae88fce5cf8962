pub mod watchlists_model;
pub mod watchlists_service;
pub mod watchlists_traits;

pub use watchlists_model::WatchlistItem;
pub use watchlists_service::WatchlistService;
pub use watchlists_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
