use sqlx::error::ErrorKind;
use thiserror::Error;

/// SQLite primary result code for "unable to open database file".
const SQLITE_CANTOPEN: i32 = 14;

/// Failures of store operations, split so callers can choose retry or abort.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation(_))
    }

    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self, StoreError::SchemaMismatch(_))
    }

    pub fn is_connection_failed(&self) -> bool {
        matches!(self, StoreError::ConnectionFailed(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        classify(&err).unwrap_or(StoreError::Database(err))
    }
}

fn classify(err: &sqlx::Error) -> Option<StoreError> {
    match err {
        sqlx::Error::Database(db_err) => {
            let message = db_err.message().to_string();
            match db_err.kind() {
                ErrorKind::UniqueViolation
                | ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::CheckViolation => Some(StoreError::ConstraintViolation(message)),
                _ if is_schema_message(&message) => Some(StoreError::SchemaMismatch(message)),
                _ if primary_code(db_err.code().as_deref()) == Some(SQLITE_CANTOPEN) => {
                    Some(StoreError::ConnectionFailed(message))
                }
                _ => None,
            }
        }
        sqlx::Error::Configuration(_)
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => Some(StoreError::ConnectionFailed(err.to_string())),
        sqlx::Error::ColumnNotFound(column) => Some(StoreError::SchemaMismatch(format!(
            "no such column: {column}"
        ))),
        _ => None,
    }
}

/// Extended result codes carry the primary code in their low byte.
fn primary_code(code: Option<&str>) -> Option<i32> {
    code.and_then(|c| c.parse::<i32>().ok()).map(|c| c & 0xff)
}

/// SQLite reports missing tables and columns only through the message text.
fn is_schema_message(message: &str) -> bool {
    message.starts_with("no such table")
        || message.starts_with("no such column")
        || message.contains("has no column named")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_connection_failures() {
        assert!(StoreError::from(sqlx::Error::PoolTimedOut).is_connection_failed());
        assert!(StoreError::from(sqlx::Error::PoolClosed).is_connection_failed());
    }

    #[test]
    fn test_missing_column_is_schema_mismatch() {
        let err = StoreError::from(sqlx::Error::ColumnNotFound("major".to_string()));
        assert!(err.is_schema_mismatch());
        assert_eq!(err.to_string(), "Schema mismatch: no such column: major");
    }

    #[test]
    fn test_primary_code_strips_extended_bits() {
        // SQLITE_CANTOPEN_ISDIR
        assert_eq!(primary_code(Some("526")), Some(SQLITE_CANTOPEN));
        assert_eq!(primary_code(Some("14")), Some(SQLITE_CANTOPEN));
        assert_eq!(primary_code(None), None);
    }

    #[test]
    fn test_schema_messages() {
        assert!(is_schema_message("no such table: school_accounts"));
        assert!(is_schema_message(
            "table school_accounts has no column named major"
        ));
        assert!(!is_schema_message("UNIQUE constraint failed: semesters.label"));
    }
}
