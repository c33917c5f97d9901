//! Configuration for seeding runs.
//!
//! Everything is read from environment variables so the binaries take no
//! flags:
//!
//! | Variable               | Default                       |
//! |------------------------|-------------------------------|
//! | `DATABASE_URL`         | `sqlite://school_records.db`  |
//! | `SEED_SHAPE`           | `extended`                    |
//! | `SEED_SEMESTER_LABEL`  | `2023-2024 Second Semester`   |
//! | `SEED_RANDOM_ACCOUNTS` | unset (sample accounts)       |
//! | `SEED_FIXTURE`         | unset (sample accounts)       |
//! | `SEED_INIT_SCHEMA`     | `false`                       |
//! | `SEED_RNG_SEED`        | unset (entropy)               |
//!
//! `SEED_RNG_SEED` reproduces school codes as well as names. School codes are
//! unique in the store, so a seeded run succeeds once per store; repeating it
//! fails with a constraint violation and commits nothing.

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use records::RecordShape;
use records::store::connect_options;

use crate::builders::{DEFAULT_SEMESTER_LABEL, SeedPlan};
use crate::db::SeedError;
use crate::generators::load_fixture;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://school_records.db";

/// Configuration for a seeding or inspection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// `sqlite:` URL or plain path of the store.
    pub database_url: String,

    /// Column set to write.
    pub shape: RecordShape,

    /// Semester created by extended runs.
    pub semester_label: String,

    /// Generate this many random accounts instead of the sample batch.
    pub random_accounts: Option<usize>,

    /// Load account profiles from this JSON file instead of the sample batch.
    pub fixture: Option<PathBuf>,

    /// Create the database file and tables when missing.
    pub init_schema: bool,

    /// Seed for names and school codes. Primary keys are always fresh.
    /// Repeating a seeded run against the same store collides on school codes.
    pub rng_seed: Option<u64>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            shape: RecordShape::Extended,
            semester_label: DEFAULT_SEMESTER_LABEL.to_string(),
            random_accounts: None,
            fixture: None,
            init_schema: false,
            rng_seed: None,
        }
    }
}

impl SeedConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, SeedError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for unset or blank variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SeedError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(shape) = get("SEED_SHAPE") {
            config.shape = shape
                .parse()
                .map_err(|e| SeedError::InvalidConfig(format!("SEED_SHAPE: {e}")))?;
        }
        if let Some(label) = get("SEED_SEMESTER_LABEL") {
            config.semester_label = label;
        }
        if let Some(count) = get("SEED_RANDOM_ACCOUNTS") {
            config.random_accounts = Some(parse_number("SEED_RANDOM_ACCOUNTS", &count)?);
        }
        if let Some(path) = get("SEED_FIXTURE") {
            config.fixture = Some(PathBuf::from(path));
        }
        if let Some(flag) = get("SEED_INIT_SCHEMA") {
            config.init_schema = parse_flag("SEED_INIT_SCHEMA", &flag)?;
        }
        if let Some(seed) = get("SEED_RNG_SEED") {
            config.rng_seed = Some(parse_number("SEED_RNG_SEED", &seed)?);
        }

        Ok(config)
    }

    /// Checks only the store location, for tools that never seed.
    pub fn validate_database_url(&self) -> Result<(), SeedError> {
        connect_options(&self.database_url)
            .map_err(|e| SeedError::InvalidConfig(format!("DATABASE_URL: {e}")))?;
        Ok(())
    }

    /// Checks the configuration before any connection is opened.
    pub fn validate(&self) -> Result<(), SeedError> {
        self.validate_database_url()?;

        if self.random_accounts == Some(0) {
            return Err(SeedError::InvalidConfig(
                "SEED_RANDOM_ACCOUNTS must be greater than zero".to_string(),
            ));
        }
        if self.random_accounts.is_some() && self.fixture.is_some() {
            return Err(SeedError::InvalidConfig(
                "SEED_RANDOM_ACCOUNTS and SEED_FIXTURE are mutually exclusive".to_string(),
            ));
        }
        if let Some(fixture) = &self.fixture {
            if !fixture.is_file() {
                return Err(SeedError::InvalidConfig(format!(
                    "SEED_FIXTURE: {} is not a file",
                    fixture.display()
                )));
            }
        }
        if self.shape.references_semester() && self.semester_label.trim().is_empty() {
            return Err(SeedError::InvalidConfig(
                "SEED_SEMESTER_LABEL cannot be blank".to_string(),
            ));
        }

        Ok(())
    }

    /// Turns the configuration into a seed plan, loading the fixture if set.
    pub fn plan(&self) -> Result<SeedPlan, SeedError> {
        let mut plan = SeedPlan::for_shape(self.shape).with_init_schema(self.init_schema);

        if self.shape.references_semester() {
            plan = plan.with_semester(self.semester_label.clone());
        }
        if let Some(count) = self.random_accounts {
            plan = plan.with_sample_accounts(false).with_random_accounts(count);
        }
        if let Some(fixture) = &self.fixture {
            plan = plan
                .with_sample_accounts(false)
                .with_profiles(load_fixture(fixture)?);
        }

        Ok(plan)
    }

    /// Random source for names and school codes.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SeedError> {
    value
        .trim()
        .parse()
        .map_err(|_| SeedError::InvalidConfig(format!("{key}: '{value}' is not a valid number")))
}

fn parse_flag(key: &str, value: &str) -> Result<bool, SeedError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(SeedError::InvalidConfig(format!(
            "{key}: '{value}' is not a boolean"
        ))),
    }
}
