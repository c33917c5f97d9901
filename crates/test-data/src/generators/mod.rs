//! Entity generators for test data.
//!
//! - [`codes`]: school codes and primary keys
//! - [`AccountGenerator`]: school accounts from fixed, random or fixture profiles

pub mod account;
pub mod codes;

pub use account::{
    AccountGenConfig, AccountGenerator, AccountProfile, CourseOffering, GeneratedAccount,
    load_fixture,
};
pub use codes::{SHORT_CODE_LEN, generate_short_code, generate_unique_id};
