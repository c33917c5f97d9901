//! Opening the SQLite store.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::errors::StoreError;

/// Turns a `sqlite:` URL or a bare file path into connect options.
pub fn connect_options(database_url: &str) -> Result<SqliteConnectOptions, StoreError> {
    let database_url = database_url.trim();
    if database_url.is_empty() {
        return Err(StoreError::ConnectionFailed(
            "database location is empty".to_string(),
        ));
    }

    let options = if database_url.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(database_url)?
    } else {
        SqliteConnectOptions::new().filename(database_url)
    };

    Ok(options.foreign_keys(true))
}

/// Opens a single-connection pool on the store.
///
/// When `create_if_missing` is false a missing database file is reported as
/// [`StoreError::ConnectionFailed`] instead of silently creating an empty one.
pub async fn connect(database_url: &str, create_if_missing: bool) -> Result<SqlitePool, StoreError> {
    let options = connect_options(database_url)?.create_if_missing(create_if_missing);

    info!("Connecting to database at {}", database_url);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Opens a private in-memory store.
///
/// The pool keeps its one connection alive, so the database lives as long as
/// the pool does.
pub async fn connect_in_memory() -> Result<SqlitePool, StoreError> {
    connect("sqlite::memory:", true).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_location_is_rejected() {
        let err = connect_options("  ").unwrap_err();
        assert!(err.is_connection_failed());
    }

    #[test]
    fn test_plain_path_is_accepted() {
        let options = connect_options("records/school.db").unwrap();
        assert_eq!(
            options.get_filename(),
            std::path::Path::new("records/school.db")
        );
    }

    #[tokio::test]
    async fn test_missing_file_without_create_fails() {
        let path = std::env::temp_dir().join(format!(
            "records-missing-{}.db",
            uuid::Uuid::new_v4()
        ));

        let err = connect(path.to_str().unwrap(), false).await.unwrap_err();
        assert!(err.is_connection_failed(), "unexpected error: {err}");
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_in_memory_store_persists_across_queries() {
        let pool = connect_in_memory().await.unwrap();
        sqlx::query("CREATE TABLE t (x INTEGER)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO t VALUES (1)")
            .execute(&pool)
            .await
            .unwrap();

        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM t")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }
}
