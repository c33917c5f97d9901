//! Record shapes and the bundled table definitions.
//!
//! A [`RecordShape`] describes which `school_accounts` columns a seeding run
//! writes. The minimal shape covers identity and name fields only; the
//! extended shape adds demographics, the active flag and the semester
//! reference.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::StoreError;

pub const SEMESTERS_TABLE: &str = "semesters";
pub const ACCOUNTS_TABLE: &str = "school_accounts";

/// A column of the `school_accounts` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountColumn {
    Id,
    SchoolId,
    FirstName,
    MiddleName,
    LastName,
    Gender,
    Course,
    Department,
    Position,
    Major,
    YearLevel,
    IsActive,
    LastUpdatedSemesterId,
}

impl AccountColumn {
    pub fn name(self) -> &'static str {
        match self {
            AccountColumn::Id => "id",
            AccountColumn::SchoolId => "school_id",
            AccountColumn::FirstName => "first_name",
            AccountColumn::MiddleName => "middle_name",
            AccountColumn::LastName => "last_name",
            AccountColumn::Gender => "gender",
            AccountColumn::Course => "course",
            AccountColumn::Department => "department",
            AccountColumn::Position => "position",
            AccountColumn::Major => "major",
            AccountColumn::YearLevel => "year_level",
            AccountColumn::IsActive => "is_active",
            AccountColumn::LastUpdatedSemesterId => "last_updated_semester_id",
        }
    }
}

const MINIMAL_COLUMNS: &[AccountColumn] = &[
    AccountColumn::Id,
    AccountColumn::SchoolId,
    AccountColumn::FirstName,
    AccountColumn::MiddleName,
    AccountColumn::LastName,
];

const EXTENDED_COLUMNS: &[AccountColumn] = &[
    AccountColumn::Id,
    AccountColumn::SchoolId,
    AccountColumn::FirstName,
    AccountColumn::MiddleName,
    AccountColumn::LastName,
    AccountColumn::Gender,
    AccountColumn::Course,
    AccountColumn::Department,
    AccountColumn::Position,
    AccountColumn::Major,
    AccountColumn::YearLevel,
    AccountColumn::IsActive,
    AccountColumn::LastUpdatedSemesterId,
];

const MINIMAL_ACCOUNTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS school_accounts (
        id TEXT PRIMARY KEY,
        school_id TEXT NOT NULL,
        first_name TEXT,
        middle_name TEXT,
        last_name TEXT,
        CONSTRAINT school_id_unique UNIQUE (school_id)
    )
"#;

const SEMESTERS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS semesters (
        id TEXT PRIMARY KEY,
        label TEXT NOT NULL,
        CONSTRAINT label_unique UNIQUE (label)
    )
"#;

const EXTENDED_ACCOUNTS_DDL: &str = r#"
    CREATE TABLE IF NOT EXISTS school_accounts (
        id TEXT PRIMARY KEY,
        school_id TEXT NOT NULL,
        first_name TEXT,
        middle_name TEXT,
        last_name TEXT,
        gender INTEGER,
        course TEXT,
        department TEXT,
        position TEXT,
        major TEXT,
        year_level TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        last_updated_semester_id TEXT,
        CONSTRAINT school_id_unique UNIQUE (school_id),
        CONSTRAINT fk_semester
            FOREIGN KEY (last_updated_semester_id)
            REFERENCES semesters(id)
    )
"#;

/// Column-set preset targeted by a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordShape {
    /// Identity and name fields only, no semester.
    Minimal,
    /// All account fields plus the semester reference.
    #[default]
    Extended,
}

impl RecordShape {
    pub fn columns(self) -> &'static [AccountColumn] {
        match self {
            RecordShape::Minimal => MINIMAL_COLUMNS,
            RecordShape::Extended => EXTENDED_COLUMNS,
        }
    }

    /// Whether accounts of this shape point at a semester.
    pub fn references_semester(self) -> bool {
        self.columns()
            .contains(&AccountColumn::LastUpdatedSemesterId)
    }

    /// Parameterized INSERT covering exactly this shape's columns.
    pub fn insert_sql(self) -> String {
        let columns = self.columns();
        let names: Vec<&str> = columns.iter().map(|c| c.name()).collect();
        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        format!(
            "INSERT INTO {ACCOUNTS_TABLE} ({}) VALUES ({})",
            names.join(", "),
            placeholders.join(", ")
        )
    }

    /// SELECT that reads every account field, substituting NULL for the
    /// columns this shape does not have.
    pub fn select_sql(self) -> String {
        let present = self.columns();
        let fields: Vec<String> = EXTENDED_COLUMNS
            .iter()
            .map(|c| {
                if present.contains(c) {
                    c.name().to_string()
                } else {
                    format!("NULL AS {}", c.name())
                }
            })
            .collect();
        format!("SELECT {} FROM {ACCOUNTS_TABLE}", fields.join(", "))
    }

    /// Picks the widest shape whose columns all appear in `columns`.
    pub fn detect<S: AsRef<str>>(columns: &[S]) -> Result<Self, StoreError> {
        let has_all = |shape: RecordShape| {
            shape
                .columns()
                .iter()
                .all(|c| columns.iter().any(|name| name.as_ref() == c.name()))
        };

        [RecordShape::Extended, RecordShape::Minimal]
            .into_iter()
            .find(|shape| has_all(*shape))
            .ok_or_else(|| {
                StoreError::SchemaMismatch(format!(
                    "{ACCOUNTS_TABLE} does not match any known record shape"
                ))
            })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordShape::Minimal => "minimal",
            RecordShape::Extended => "extended",
        }
    }
}

impl fmt::Display for RecordShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShape(pub String);

impl fmt::Display for UnknownShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown record shape '{}' (expected 'minimal' or 'extended')", self.0)
    }
}

impl std::error::Error for UnknownShape {}

impl FromStr for RecordShape {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(RecordShape::Minimal),
            "extended" => Ok(RecordShape::Extended),
            _ => Err(UnknownShape(s.to_string())),
        }
    }
}

/// Creates the tables a shape needs if they are missing.
pub async fn create_tables(pool: &SqlitePool, shape: RecordShape) -> Result<(), StoreError> {
    match shape {
        RecordShape::Minimal => {
            sqlx::query(MINIMAL_ACCOUNTS_DDL).execute(pool).await?;
        }
        RecordShape::Extended => {
            sqlx::query(SEMESTERS_DDL).execute(pool).await?;
            sqlx::query(EXTENDED_ACCOUNTS_DDL).execute(pool).await?;
        }
    }

    info!("Ensured {} schema", shape);
    Ok(())
}
