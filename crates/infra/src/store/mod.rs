//! Persistence boundary.
//!
//! This module defines the storage contracts the services depend on, plus two
//! adapters: an in-memory store for dev/tests and a Postgres store.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use r#trait::{CartStore, MemberStore, ProductStore, StoreError};
