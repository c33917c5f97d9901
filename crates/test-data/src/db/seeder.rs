//! Database seeding utilities.

use sqlx::{Sqlite, SqlitePool, Transaction};
use thiserror::Error;
use tracing::{error, info, warn};

use records::schema::{self, AccountColumn, RecordShape};
use records::{Database, Semester, StoreCounts, StoreError};

use crate::generators::GeneratedAccount;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Fixture error: {0}")]
    Fixture(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<sqlx::Error> for SeedError {
    fn from(err: sqlx::Error) -> Self {
        SeedError::Store(err.into())
    }
}

impl SeedError {
    /// The store-level failure, if this error came from the store.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            SeedError::Store(err) => Some(err),
            _ => None,
        }
    }
}

/// Outcome of a committed seeding run.
#[derive(Debug, Clone)]
pub struct SeedReport {
    pub shape: RecordShape,
    /// Semester inserted by this run, if any.
    pub semester: Option<Semester>,
    /// Accounts inserted by this run.
    pub inserted: usize,
    /// Store totals read back after commit; `None` when that read failed.
    pub totals: Option<StoreCounts>,
}

impl SeedReport {
    pub fn semester_id(&self) -> Option<uuid::Uuid> {
        self.semester.as_ref().map(|s| s.id)
    }
}

/// A bound parameter for one account column.
enum ColumnValue {
    Text(Option<String>),
    Integer(Option<i64>),
    Flag(bool),
}

fn column_value(
    column: AccountColumn,
    account: &GeneratedAccount,
    semester_id: Option<&str>,
) -> ColumnValue {
    let profile = &account.profile;
    match column {
        AccountColumn::Id => ColumnValue::Text(Some(account.id.clone())),
        AccountColumn::SchoolId => ColumnValue::Text(Some(account.school_id.clone())),
        AccountColumn::FirstName => ColumnValue::Text(Some(profile.first_name.clone())),
        AccountColumn::MiddleName => ColumnValue::Text(Some(profile.middle_name.clone())),
        AccountColumn::LastName => ColumnValue::Text(Some(profile.last_name.clone())),
        AccountColumn::Gender => ColumnValue::Integer(profile.gender.map(|g| g.as_flag())),
        AccountColumn::Course => ColumnValue::Text(profile.course.clone()),
        AccountColumn::Department => ColumnValue::Text(profile.department.clone()),
        AccountColumn::Position => ColumnValue::Text(profile.position.clone()),
        AccountColumn::Major => ColumnValue::Text(profile.major.clone()),
        AccountColumn::YearLevel => ColumnValue::Text(profile.year_level.clone()),
        AccountColumn::IsActive => ColumnValue::Flag(profile.is_active),
        AccountColumn::LastUpdatedSemesterId => {
            ColumnValue::Text(semester_id.map(str::to_string))
        }
    }
}

/// Database seeder for inserting a semester and its school accounts.
pub struct Seeder {
    pool: SqlitePool,
    shape: RecordShape,
}

impl Seeder {
    /// Creates a seeder targeting the extended record shape.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            shape: RecordShape::Extended,
        }
    }

    /// Sets the record shape accounts are written with.
    pub fn with_shape(mut self, shape: RecordShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn shape(&self) -> RecordShape {
        self.shape
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the tables for this seeder's shape if they are missing.
    pub async fn ensure_schema(&self) -> Result<(), SeedError> {
        schema::create_tables(&self.pool, self.shape).await?;
        Ok(())
    }

    /// Inserts an optional semester and the given accounts in one transaction.
    ///
    /// Accounts reference the new semester when the shape carries a semester
    /// column. An error means nothing was committed; once the commit succeeds
    /// the run is reported as seeded even if the totals cannot be read back.
    pub async fn seed(
        &self,
        semester_label: Option<&str>,
        accounts: &[GeneratedAccount],
    ) -> Result<SeedReport, SeedError> {
        let semester = match self.insert_batch(semester_label, accounts).await {
            Ok(semester) => semester,
            Err(err) => {
                error!("Seeding failed, no rows committed: {err}");
                return Err(err);
            }
        };

        Ok(SeedReport {
            shape: self.shape,
            semester,
            inserted: accounts.len(),
            totals: self.read_totals().await,
        })
    }

    /// Post-commit verification counts.
    async fn read_totals(&self) -> Option<StoreCounts> {
        match Database::new(self.pool.clone()).counts().await {
            Ok(totals) => Some(totals),
            Err(err) => {
                warn!("Rows committed, but reading totals back failed: {err}");
                None
            }
        }
    }

    async fn insert_batch(
        &self,
        semester_label: Option<&str>,
        accounts: &[GeneratedAccount],
    ) -> Result<Option<Semester>, SeedError> {
        let semester = self.prepare_semester(semester_label)?;

        info!(
            "Seeding {} {} accounts...",
            accounts.len(),
            self.shape.as_str()
        );

        // Rolled back on drop if we return early.
        let mut tx = self.pool.begin().await?;

        if let Some(semester) = &semester {
            insert_semester(&mut tx, semester).await?;
            info!("Created semester with ID: {}", semester.id);
        }

        let semester_id = semester.as_ref().map(|s| s.id.to_string());
        let sql = self.shape.insert_sql();
        for account in accounts {
            self.insert_account(&mut tx, &sql, account, semester_id.as_deref())
                .await?;
        }

        tx.commit().await?;
        info!("Seeded {} accounts", accounts.len());

        Ok(semester)
    }

    fn prepare_semester(&self, label: Option<&str>) -> Result<Option<Semester>, SeedError> {
        let Some(label) = label else {
            return Ok(None);
        };

        if !self.shape.references_semester() {
            return Err(SeedError::InvalidInput(format!(
                "the {} record shape has no semester reference",
                self.shape
            )));
        }

        let label = label.trim();
        if label.is_empty() {
            return Err(SeedError::InvalidInput(
                "Semester label cannot be empty".to_string(),
            ));
        }

        Ok(Some(Semester::new(label)))
    }

    /// Inserts a single account using this seeder's column set.
    async fn insert_account(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        sql: &str,
        account: &GeneratedAccount,
        semester_id: Option<&str>,
    ) -> Result<(), SeedError> {
        let mut query = sqlx::query(sql);
        for column in self.shape.columns() {
            query = match column_value(*column, account, semester_id) {
                ColumnValue::Text(value) => query.bind(value),
                ColumnValue::Integer(value) => query.bind(value),
                ColumnValue::Flag(value) => query.bind(value),
            };
        }

        query.execute(&mut **tx).await?;
        Ok(())
    }
}

async fn insert_semester(
    tx: &mut Transaction<'_, Sqlite>,
    semester: &Semester,
) -> Result<(), SeedError> {
    sqlx::query("INSERT INTO semesters (id, label) VALUES (?1, ?2)")
        .bind(semester.id.to_string())
        .bind(&semester.label)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{AccountGenerator, AccountProfile};
    use records::store::connect_in_memory;

    async fn seeder(shape: RecordShape) -> Seeder {
        let pool = connect_in_memory().await.unwrap();
        let seeder = Seeder::new(pool).with_shape(shape);
        seeder.ensure_schema().await.unwrap();
        seeder
    }

    fn sample_accounts() -> Vec<GeneratedAccount> {
        AccountGenerator::new()
            .generate_batch(AccountGenerator::sample_profiles(), &mut rand::thread_rng())
    }

    #[tokio::test]
    async fn test_seed_extended_with_semester() {
        let seeder = seeder(RecordShape::Extended).await;
        let accounts = sample_accounts();

        let report = seeder
            .seed(Some("2023-2024 Second Semester"), &accounts)
            .await
            .unwrap();

        assert_eq!(report.inserted, 4);
        assert_eq!(report.totals.unwrap().semesters, Some(1));
        assert_eq!(report.totals.unwrap().accounts, 4);

        let semester = report.semester.unwrap();
        assert_eq!(semester.label, "2023-2024 Second Semester");

        let db = Database::new(seeder.pool().clone());
        let linked = db.accounts_for_semester(semester.id).await.unwrap();
        assert_eq!(linked.len(), 4);
    }

    #[tokio::test]
    async fn test_seed_extended_without_semester_leaves_reference_unset() {
        let seeder = seeder(RecordShape::Extended).await;
        let report = seeder.seed(None, &sample_accounts()).await.unwrap();

        assert!(report.semester.is_none());
        assert_eq!(report.totals.unwrap().semesters, Some(0));

        let accounts = Database::new(seeder.pool().clone())
            .all_accounts()
            .await
            .unwrap();
        assert!(accounts.iter().all(|a| a.last_updated_semester_id.is_none()));
    }

    #[tokio::test]
    async fn test_empty_label_is_rejected_before_store() {
        let seeder = seeder(RecordShape::Extended).await;
        let err = seeder.seed(Some("   "), &sample_accounts()).await.unwrap_err();

        assert!(matches!(err, SeedError::InvalidInput(_)));
        assert_eq!(seeder_counts(&seeder).await, (Some(0), 0));
    }

    #[tokio::test]
    async fn test_minimal_shape_rejects_semester() {
        let seeder = seeder(RecordShape::Minimal).await;
        let err = seeder
            .seed(Some("2023-2024 Second Semester"), &sample_accounts())
            .await
            .unwrap_err();

        assert!(matches!(err, SeedError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_empty_batch_inserts_only_semester() {
        let seeder = seeder(RecordShape::Extended).await;
        let report = seeder.seed(Some("Summer 2024"), &[]).await.unwrap();

        assert_eq!(report.inserted, 0);
        assert_eq!(report.totals.unwrap().semesters, Some(1));
        assert_eq!(report.totals.unwrap().accounts, 0);
    }

    #[tokio::test]
    async fn test_duplicate_school_id_rolls_back() {
        let seeder = seeder(RecordShape::Extended).await;
        let mut accounts = sample_accounts();
        accounts[3].school_id = accounts[0].school_id.clone();

        let err = seeder
            .seed(Some("2023-2024 Second Semester"), &accounts)
            .await
            .unwrap_err();

        assert!(
            err.store_error()
                .is_some_and(StoreError::is_constraint_violation),
            "unexpected error: {err}"
        );
        assert_eq!(seeder_counts(&seeder).await, (Some(0), 0));
    }

    #[tokio::test]
    async fn test_duplicate_semester_label_is_constraint_violation() {
        let seeder = seeder(RecordShape::Extended).await;
        seeder.seed(Some("Fall 2024"), &[]).await.unwrap();

        let err = seeder
            .seed(Some("Fall 2024"), &sample_accounts())
            .await
            .unwrap_err();

        assert!(err.store_error().is_some_and(StoreError::is_constraint_violation));
        assert_eq!(seeder_counts(&seeder).await, (Some(1), 0));
    }

    #[tokio::test]
    async fn test_missing_table_is_schema_mismatch() {
        let pool = connect_in_memory().await.unwrap();
        let seeder = Seeder::new(pool).with_shape(RecordShape::Minimal);

        let err = seeder.seed(None, &sample_accounts()).await.unwrap_err();
        assert!(
            err.store_error().is_some_and(StoreError::is_schema_mismatch),
            "unexpected error: {err}"
        );
    }

    #[tokio::test]
    async fn test_totals_unreadable_after_commit_are_unset() {
        let seeder = seeder(RecordShape::Extended).await;
        let report = seeder
            .seed(Some("2024-2025 First Semester"), &sample_accounts())
            .await
            .unwrap();
        assert_eq!(report.totals.unwrap().accounts, 4);

        seeder.pool().close().await;
        assert_eq!(seeder.read_totals().await, None);
    }

    #[test]
    fn test_column_values_follow_profile() {
        let mut profile = AccountProfile::named("Ana", "Cruz", "Reyes");
        profile.gender = Some(records::Gender::Female);
        profile.is_active = false;
        let account = AccountGenerator::new().generate(profile, &mut rand::thread_rng());

        assert!(matches!(
            column_value(AccountColumn::Gender, &account, None),
            ColumnValue::Integer(Some(1))
        ));
        assert!(matches!(
            column_value(AccountColumn::IsActive, &account, None),
            ColumnValue::Flag(false)
        ));
        assert!(matches!(
            column_value(AccountColumn::Course, &account, None),
            ColumnValue::Text(None)
        ));
        assert!(matches!(
            column_value(AccountColumn::LastUpdatedSemesterId, &account, Some("abc")),
            ColumnValue::Text(Some(ref id)) if id == "abc"
        ));
    }

    async fn seeder_counts(seeder: &Seeder) -> (Option<i64>, i64) {
        let counts = Database::new(seeder.pool().clone()).counts().await.unwrap();
        (counts.semesters, counts.accounts)
    }
}
