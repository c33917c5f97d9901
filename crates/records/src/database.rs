use sqlx::SqlitePool;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::{SchoolAccount, StoreCounts};
use crate::schema::{ACCOUNTS_TABLE, RecordShape, SEMESTERS_TABLE};

/// Read access to the school records store.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Names of all tables, in creation order.
    pub async fn list_tables(&self) -> Result<Vec<String>, StoreError> {
        let tables: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;

        Ok(tables.into_iter().map(|(name,)| name).collect())
    }

    /// Column names of `table` in declaration order; empty if the table is missing.
    pub async fn table_columns(&self, table: &str) -> Result<Vec<String>, StoreError> {
        let columns: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM pragma_table_info(?1) ORDER BY cid")
                .bind(table)
                .fetch_all(&self.pool)
                .await?;

        Ok(columns.into_iter().map(|(name,)| name).collect())
    }

    pub async fn table_exists(&self, table: &str) -> Result<bool, StoreError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        )
        .bind(table)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    pub async fn count_accounts(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM school_accounts")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Semester total, or `None` when the store has no semesters table.
    pub async fn count_semesters(&self) -> Result<Option<i64>, StoreError> {
        if !self.table_exists(SEMESTERS_TABLE).await? {
            return Ok(None);
        }

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM semesters")
            .fetch_one(&self.pool)
            .await?;

        Ok(Some(count))
    }

    pub async fn counts(&self) -> Result<StoreCounts, StoreError> {
        Ok(StoreCounts {
            semesters: self.count_semesters().await?,
            accounts: self.count_accounts().await?,
        })
    }

    /// Shape of the `school_accounts` table as it exists in the store.
    pub async fn accounts_shape(&self) -> Result<RecordShape, StoreError> {
        let columns = self.table_columns(ACCOUNTS_TABLE).await?;
        if columns.is_empty() {
            return Err(StoreError::SchemaMismatch(format!(
                "no such table: {ACCOUNTS_TABLE}"
            )));
        }
        RecordShape::detect(columns.as_slice())
    }

    /// Every account, reading absent columns as unset.
    pub async fn all_accounts(&self) -> Result<Vec<SchoolAccount>, StoreError> {
        let shape = self.accounts_shape().await?;
        let sql = format!("{} ORDER BY rowid", shape.select_sql());

        let accounts = sqlx::query_as::<_, SchoolAccount>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(accounts)
    }

    pub async fn accounts_for_semester(
        &self,
        semester_id: Uuid,
    ) -> Result<Vec<SchoolAccount>, StoreError> {
        let sql = format!(
            "{} WHERE last_updated_semester_id = ?1 ORDER BY rowid",
            RecordShape::Extended.select_sql()
        );

        let accounts = sqlx::query_as::<_, SchoolAccount>(&sql)
            .bind(semester_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        Ok(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::create_tables;
    use crate::store::connect_in_memory;

    async fn extended_db() -> Database {
        let pool = connect_in_memory().await.unwrap();
        create_tables(&pool, RecordShape::Extended).await.unwrap();
        Database::new(pool)
    }

    #[tokio::test]
    async fn test_tables_and_columns() {
        let db = extended_db().await;

        let tables = db.list_tables().await.unwrap();
        assert_eq!(tables, vec!["semesters", "school_accounts"]);

        let columns = db.table_columns("semesters").await.unwrap();
        assert_eq!(columns, vec!["id", "label"]);
        assert!(db.table_columns("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_counts_on_empty_store() {
        let db = extended_db().await;
        let counts = db.counts().await.unwrap();
        assert_eq!(counts.semesters, Some(0));
        assert_eq!(counts.accounts, 0);
    }

    #[tokio::test]
    async fn test_semesters_missing_in_minimal_store() {
        let pool = connect_in_memory().await.unwrap();
        create_tables(&pool, RecordShape::Minimal).await.unwrap();
        let db = Database::new(pool);

        assert_eq!(db.count_semesters().await.unwrap(), None);
        assert_eq!(db.accounts_shape().await.unwrap(), RecordShape::Minimal);
    }

    #[tokio::test]
    async fn test_accounts_without_table_is_schema_mismatch() {
        let pool = connect_in_memory().await.unwrap();
        let db = Database::new(pool);

        let err = db.all_accounts().await.unwrap_err();
        assert!(err.is_schema_mismatch());
    }
}
