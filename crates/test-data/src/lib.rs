//! Test data seeding for the school records store.
//!
//! This crate generates semesters and school accounts and inserts them
//! transactionally, in either the minimal or the extended record shape. It
//! also provides a read-only inspector for checking what a run left behind.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let pool = records::store::connect("sqlite://school_records.db", true).await?;
//! let outcome = SeedPlan::extended()
//!     .with_semester("2024-2025 First Semester")
//!     .with_random_accounts(20)
//!     .with_init_schema(true)
//!     .build(&pool, &mut rand::thread_rng())
//!     .await?;
//! ```

pub mod builders;
pub mod config;
pub mod db;
pub mod generators;

pub use records::{Gender, RecordShape, SchoolAccount, Semester, StoreCounts};

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::builders::{SeedOutcome, SeedPlan};
    pub use crate::config::SeedConfig;
    pub use crate::db::{Inspector, SeedError, SeedReport, Seeder};
    pub use crate::generators::{
        AccountGenerator, AccountProfile, GeneratedAccount, generate_short_code,
        generate_unique_id,
    };
    pub use crate::{Gender, RecordShape};
}
