//! PostgreSQL persistence adapters.

mod diesel_item_store;
mod models;
pub mod pool;
pub(crate) mod schema;

pub use diesel_item_store::DieselItemStore;
pub use pool::{DbPool, PoolConfig, PoolError};
