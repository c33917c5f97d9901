//! Store layer for the school records application.
//!
//! Holds the entity models, the record shapes the seeding tools target, the
//! typed error taxonomy and read-side queries over a SQLite store.

pub mod database;
pub mod errors;
pub mod models;
pub mod schema;
pub mod store;

pub use database::Database;
pub use errors::StoreError;
pub use models::{Gender, SchoolAccount, Semester, StoreCounts};
pub use schema::{AccountColumn, RecordShape};
