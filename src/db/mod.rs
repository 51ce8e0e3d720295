//! Match persistence: the store interface and its implementations.

mod error;
mod memory;
mod models;
mod repository;
mod schema; // Diesel generated schema - internal use only
mod store;

pub use error::{StoreError, StoreErrorKind};
pub use memory::InMemoryMatchStore;
pub use repository::SqliteMatchStore;
pub use store::{MatchFilter, MatchStore};
