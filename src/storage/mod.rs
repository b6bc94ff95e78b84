//! SQLite storage layer for Belongings.
//!
//! # Submodules
//!
//! - [`schema`] - Table definition and first-run seeding
//! - [`migrations`] - Additive column migrations
//! - [`sqlite`] - Synchronous SQLite access to the `items` table
//! - [`repository`] - Async, lifecycle-managed repository used by the app

pub mod migrations;
pub mod repository;
pub mod schema;
pub mod sqlite;

pub use repository::{ItemRepository, StoreTarget};
pub use sqlite::SqliteStorage;
