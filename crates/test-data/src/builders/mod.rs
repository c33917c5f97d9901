//! Fluent builder APIs for seeding runs.
//!
//! The [`SeedPlan`] collects the record shape, semester and account sources
//! for one run and hands the generated batch to the seeder.

mod plan;

pub use plan::{DEFAULT_SEMESTER_LABEL, SeedOutcome, SeedPlan};
