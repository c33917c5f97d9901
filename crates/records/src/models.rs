use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An academic term that school accounts are grouped under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: Uuid,
    pub label: String,
}

impl Semester {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
        }
    }
}

/// Binary gender flag as stored in `school_accounts.gender`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Integer flag written to the store.
    pub fn as_flag(self) -> i64 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Gender::Male),
            1 => Some(Gender::Female),
            _ => None,
        }
    }
}

/// A school account row as read back from the store.
///
/// Ids are kept as stored text so that rows written by other tools still
/// load. Columns missing from the minimal record shape read as `None`.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct SchoolAccount {
    pub id: String,
    pub school_id: String,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<i64>,
    pub course: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub major: Option<String>,
    pub year_level: Option<String>,
    pub is_active: Option<bool>,
    pub last_updated_semester_id: Option<String>,
}

impl SchoolAccount {
    /// Space-joined name parts, skipping the ones that are unset.
    pub fn full_name(&self) -> String {
        [&self.first_name, &self.middle_name, &self.last_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Row totals used for post-seed verification and inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoreCounts {
    /// `None` when the store has no `semesters` table.
    pub semesters: Option<i64>,
    pub accounts: i64,
}
