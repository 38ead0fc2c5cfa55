//! SQLite persistence adapter.
//!
//! Diesel ORM on a shared r2d2 connection pool, with migrations embedded
//! into the binary.

pub mod connection;
pub mod model;
pub mod schema;
pub mod store;

pub use connection::{create_pool, run_migrations, DbPool};
pub use store::SqliteSignalStore;
