//! Database integration for seeding and inspecting school records.
//!
//! The [`Seeder`] inserts a semester and its accounts in a single
//! transaction; the [`Inspector`] reads the store back for display.

mod inspector;
mod seeder;

pub use inspector::{Inspector, TableInfo, render_accounts, render_tables};
pub use seeder::{SeedError, SeedReport, Seeder};
