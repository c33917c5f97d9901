//! Read-only inspection of a seeded store.

use sqlx::SqlitePool;
use tracing::debug;

use records::schema::ACCOUNTS_TABLE;
use records::{Database, Gender, SchoolAccount};

use crate::db::SeedError;

/// A table and its column names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<String>,
}

/// Lists schema metadata and dumps school accounts.
pub struct Inspector {
    db: Database,
}

impl Inspector {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            db: Database::new(pool),
        }
    }

    pub async fn list_tables(&self) -> Result<Vec<TableInfo>, SeedError> {
        let mut tables = Vec::new();
        for name in self.db.list_tables().await? {
            let columns = self.db.table_columns(&name).await?;
            debug!("Table {} has {} columns", name, columns.len());
            tables.push(TableInfo { name, columns });
        }
        Ok(tables)
    }

    /// Account total; a store without the accounts table counts as empty.
    pub async fn account_count(&self) -> Result<i64, SeedError> {
        if !self.db.table_exists(ACCOUNTS_TABLE).await? {
            return Ok(0);
        }
        Ok(self.db.count_accounts().await?)
    }

    pub async fn accounts(&self) -> Result<Vec<SchoolAccount>, SeedError> {
        if !self.db.table_exists(ACCOUNTS_TABLE).await? {
            return Ok(Vec::new());
        }
        Ok(self.db.all_accounts().await?)
    }

    /// Both reports, as printed by the `inspect` binary.
    pub async fn report(&self) -> Result<String, SeedError> {
        let tables = self.list_tables().await?;
        let count = self.account_count().await?;
        let accounts = self.accounts().await?;

        let mut out = render_tables(&tables);
        out.push('\n');
        out.push_str(&render_accounts(count, &accounts));
        Ok(out)
    }
}

pub fn render_tables(tables: &[TableInfo]) -> String {
    if tables.is_empty() {
        return "No tables found in the database.\n".to_string();
    }

    let mut out = String::from("Tables in the database:\n");
    for table in tables {
        out.push_str(&format!("\nTable: {}\n", table.name));
        if table.columns.is_empty() {
            out.push_str("No columns found.\n");
            continue;
        }
        out.push_str("Columns:\n");
        for column in &table.columns {
            out.push_str(column);
            out.push('\n');
        }
    }
    out
}

pub fn render_accounts(count: i64, accounts: &[SchoolAccount]) -> String {
    let mut out = format!("Total number of school accounts: {count}\n");

    if accounts.is_empty() {
        out.push_str("\nNo school accounts found.\n");
        return out;
    }

    out.push_str("\nDetails of each account:\n");
    for account in accounts {
        out.push_str(&format!(
            "\nID: {}\n\
             School ID: {}\n\
             Name: {}\n\
             Gender: {}\n\
             Course: {}\n\
             Department: {}\n\
             Position: {}\n\
             Major: {}\n\
             Year Level: {}\n\
             Active: {}\n\
             Last Updated: {}\n",
            account.id,
            account.school_id,
            account.full_name(),
            show_gender(account.gender),
            show(&account.course),
            show(&account.department),
            show(&account.position),
            show(&account.major),
            show(&account.year_level),
            show(&account.is_active),
            show(&account.last_updated_semester_id),
        ));
    }
    out
}

fn show<T: std::fmt::Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Gender flag as a word; flags outside 0/1 are shown as stored.
fn show_gender(flag: Option<i64>) -> String {
    match flag {
        Some(flag) => Gender::from_flag(flag)
            .map_or_else(|| flag.to_string(), |g| g.as_str().to_string()),
        None => "-".to_string(),
    }
}
