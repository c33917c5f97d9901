//! Fluent builder for a seeding run.

use rand::Rng;
use sqlx::SqlitePool;
use tracing::info;

use records::RecordShape;

use crate::db::{SeedError, SeedReport, Seeder};
use crate::generators::{AccountGenConfig, AccountGenerator, AccountProfile, GeneratedAccount};

/// Label used by the default extended run.
pub const DEFAULT_SEMESTER_LABEL: &str = "2023-2024 Second Semester";

/// Result of building and seeding a plan.
#[derive(Debug)]
pub struct SeedOutcome {
    /// The accounts that were generated and inserted.
    pub accounts: Vec<GeneratedAccount>,
    pub report: SeedReport,
}

/// Builder describing what one seeding run inserts.
///
/// # Example
///
/// ```rust,ignore
/// let outcome = SeedPlan::extended()
///     .with_semester("2024-2025 First Semester")
///     .with_random_accounts(25)
///     .build(&pool, &mut rng)
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct SeedPlan {
    shape: RecordShape,
    semester_label: Option<String>,
    sample_accounts: bool,
    random_accounts: usize,
    profiles: Vec<AccountProfile>,
    account_config: AccountGenConfig,
    init_schema: bool,
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self::extended()
    }
}

impl SeedPlan {
    /// Semester plus the four sample accounts, all columns.
    pub fn extended() -> Self {
        Self {
            shape: RecordShape::Extended,
            semester_label: Some(DEFAULT_SEMESTER_LABEL.to_string()),
            sample_accounts: true,
            random_accounts: 0,
            profiles: Vec::new(),
            account_config: AccountGenConfig::default(),
            init_schema: false,
        }
    }

    /// The four sample accounts with identity and name columns only.
    pub fn minimal() -> Self {
        Self {
            shape: RecordShape::Minimal,
            semester_label: None,
            ..Self::extended()
        }
    }

    /// Plan for a given shape with that shape's defaults.
    pub fn for_shape(shape: RecordShape) -> Self {
        match shape {
            RecordShape::Minimal => Self::minimal(),
            RecordShape::Extended => Self::extended(),
        }
    }

    pub fn shape(&self) -> RecordShape {
        self.shape
    }

    pub fn semester_label(&self) -> Option<&str> {
        self.semester_label.as_deref()
    }

    /// Sets the semester label.
    pub fn with_semester(mut self, label: impl Into<String>) -> Self {
        self.semester_label = Some(label.into());
        self
    }

    /// Seeds accounts without creating a semester.
    pub fn without_semester(mut self) -> Self {
        self.semester_label = None;
        self
    }

    /// Includes or drops the four sample accounts.
    pub fn with_sample_accounts(mut self, enabled: bool) -> Self {
        self.sample_accounts = enabled;
        self
    }

    /// Adds `count` accounts with random names and academic fields.
    pub fn with_random_accounts(mut self, count: usize) -> Self {
        self.random_accounts = count;
        self
    }

    /// Adds caller-supplied profiles, e.g. from a JSON fixture.
    pub fn with_profiles(mut self, profiles: Vec<AccountProfile>) -> Self {
        self.profiles.extend(profiles);
        self
    }

    /// Sets the random account generation configuration.
    pub fn with_account_config(mut self, config: AccountGenConfig) -> Self {
        self.account_config = config;
        self
    }

    /// Creates the shape's tables before seeding.
    pub fn with_init_schema(mut self, enabled: bool) -> Self {
        self.init_schema = enabled;
        self
    }

    /// Generates the accounts without touching the database.
    pub fn build_data(&self, rng: &mut impl Rng) -> Vec<GeneratedAccount> {
        let account_gen = AccountGenerator::with_config(self.account_config.clone());

        let mut profiles = Vec::new();
        if self.sample_accounts {
            profiles.extend(AccountGenerator::sample_profiles());
        }
        profiles.extend(self.profiles.iter().cloned());
        profiles.extend(account_gen.random_profiles(self.random_accounts, rng));

        account_gen.generate_batch(profiles, rng)
    }

    /// Generates the accounts and seeds them into the database.
    pub async fn build(
        &self,
        pool: &SqlitePool,
        rng: &mut impl Rng,
    ) -> Result<SeedOutcome, SeedError> {
        let accounts = self.build_data(rng);
        info!(
            "Planned {} accounts for the {} shape",
            accounts.len(),
            self.shape
        );

        let seeder = Seeder::new(pool.clone()).with_shape(self.shape);
        if self.init_schema {
            seeder.ensure_schema().await?;
        }

        let report = seeder
            .seed(self.semester_label.as_deref(), &accounts)
            .await?;

        Ok(SeedOutcome { accounts, report })
    }
}
