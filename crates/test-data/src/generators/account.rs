//! School account generation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use fake::{Fake, faker::name::en::FirstName, faker::name::en::LastName};
use rand::Rng;
use serde::{Deserialize, Serialize};

use records::Gender;

use crate::db::SeedError;
use crate::generators::codes::{generate_short_code, generate_unique_id};

/// The caller-supplied part of an account: everything except the generated
/// identifiers and the semester reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub course: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub year_level: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl AccountProfile {
    /// A profile with only name fields set.
    pub fn named(first: &str, middle: &str, last: &str) -> Self {
        Self {
            first_name: first.to_string(),
            middle_name: middle.to_string(),
            last_name: last.to_string(),
            gender: None,
            course: None,
            department: None,
            position: None,
            major: None,
            year_level: None,
            is_active: true,
        }
    }

    fn student(
        first: &str,
        middle: &str,
        last: &str,
        gender: Gender,
        course: &str,
        major: &str,
        year_level: &str,
    ) -> Self {
        Self {
            gender: Some(gender),
            course: Some(course.to_string()),
            department: Some("Engineering".to_string()),
            position: Some("Student".to_string()),
            major: Some(major.to_string()),
            year_level: Some(year_level.to_string()),
            ..Self::named(first, middle, last)
        }
    }
}

/// Generated account ready for insertion.
#[derive(Debug, Clone)]
pub struct GeneratedAccount {
    /// Primary key, hyphenated v4 UUID.
    pub id: String,
    /// 8-character alphanumeric school code.
    pub school_id: String,
    pub profile: AccountProfile,
}

/// A course with the department it belongs to and the majors it offers.
#[derive(Debug, Clone)]
pub struct CourseOffering {
    pub course: String,
    pub department: String,
    pub majors: Vec<String>,
}

impl CourseOffering {
    fn new(course: &str, department: &str, majors: &[&str]) -> Self {
        Self {
            course: course.to_string(),
            department: department.to_string(),
            majors: majors.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Configuration for random account generation.
#[derive(Debug, Clone)]
pub struct AccountGenConfig {
    /// Probability that a generated account is female.
    pub female_rate: f64,
    /// Probability that a generated account is active.
    pub active_rate: f64,
    pub courses: Vec<CourseOffering>,
    pub year_levels: Vec<String>,
    pub position: String,
}

impl Default for AccountGenConfig {
    fn default() -> Self {
        Self {
            female_rate: 0.5,
            active_rate: 0.95,
            courses: vec![
                CourseOffering::new(
                    "Computer Science",
                    "Engineering",
                    &["Software Engineering", "Data Science"],
                ),
                CourseOffering::new(
                    "Information Technology",
                    "Engineering",
                    &["Network Security", "Web Development"],
                ),
                CourseOffering::new(
                    "Civil Engineering",
                    "Engineering",
                    &["Structural Design", "Transportation"],
                ),
                CourseOffering::new(
                    "Electronics Engineering",
                    "Engineering",
                    &["Robotics", "Embedded Systems"],
                ),
                CourseOffering::new(
                    "Secondary Education",
                    "Education",
                    &["Mathematics", "English"],
                ),
            ],
            year_levels: ["1st Year", "2nd Year", "3rd Year", "4th Year"]
                .iter()
                .map(|y| y.to_string())
                .collect(),
            position: "Student".to_string(),
        }
    }
}

/// Generates school accounts from fixed or random profiles.
pub struct AccountGenerator {
    config: AccountGenConfig,
}

impl AccountGenerator {
    /// Creates a new account generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: AccountGenConfig::default(),
        }
    }

    /// Creates a generator with custom configuration.
    pub fn with_config(config: AccountGenConfig) -> Self {
        Self { config }
    }

    /// The fixed four-student sample batch.
    pub fn sample_profiles() -> Vec<AccountProfile> {
        vec![
            AccountProfile::student(
                "John",
                "Doe",
                "Smith",
                Gender::Male,
                "Computer Science",
                "Software Engineering",
                "3rd Year",
            ),
            AccountProfile::student(
                "Jane",
                "Mary",
                "Johnson",
                Gender::Female,
                "Information Technology",
                "Network Security",
                "2nd Year",
            ),
            AccountProfile::student(
                "Michael",
                "Lee",
                "Taylor",
                Gender::Male,
                "Civil Engineering",
                "Structural Design",
                "4th Year",
            ),
            AccountProfile::student(
                "Emily",
                "Anne",
                "Brown",
                Gender::Female,
                "Electronics Engineering",
                "Robotics",
                "3rd Year",
            ),
        ]
    }

    /// Builds a random profile with fake names and configured academic fields.
    pub fn random_profile(&self, rng: &mut impl Rng) -> AccountProfile {
        let first_name: String = FirstName().fake_with_rng(rng);
        let middle_name: String = LastName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);

        let gender = if rng.gen_bool(self.config.female_rate) {
            Gender::Female
        } else {
            Gender::Male
        };

        let offering = pick(&self.config.courses, rng);
        let major = offering.and_then(|o| pick(&o.majors, rng)).cloned();

        AccountProfile {
            first_name,
            middle_name,
            last_name,
            gender: Some(gender),
            course: offering.map(|o| o.course.clone()),
            department: offering.map(|o| o.department.clone()),
            position: Some(self.config.position.clone()),
            major,
            year_level: pick(&self.config.year_levels, rng).cloned(),
            is_active: rng.gen_bool(self.config.active_rate),
        }
    }

    /// Builds `count` random profiles.
    pub fn random_profiles(&self, count: usize, rng: &mut impl Rng) -> Vec<AccountProfile> {
        (0..count).map(|_| self.random_profile(rng)).collect()
    }

    /// Attaches a fresh id and school code to a profile.
    pub fn generate(&self, profile: AccountProfile, rng: &mut impl Rng) -> GeneratedAccount {
        GeneratedAccount {
            id: generate_unique_id(),
            school_id: generate_short_code(rng),
            profile,
        }
    }

    /// Generates one account per profile. School codes are distinct within
    /// the returned batch; a clash is redrawn.
    pub fn generate_batch(
        &self,
        profiles: Vec<AccountProfile>,
        rng: &mut impl Rng,
    ) -> Vec<GeneratedAccount> {
        let mut seen = HashSet::with_capacity(profiles.len());

        profiles
            .into_iter()
            .map(|profile| {
                let mut account = self.generate(profile, rng);
                while !seen.insert(account.school_id.clone()) {
                    account.school_id = generate_short_code(rng);
                }
                account
            })
            .collect()
    }
}

impl Default for AccountGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a JSON array of profiles.
pub fn load_fixture(path: &Path) -> Result<Vec<AccountProfile>, SeedError> {
    let contents = fs::read_to_string(path)?;
    let profiles = serde_json::from_str(&contents)?;
    Ok(profiles)
}

fn pick<'a, T>(items: &'a [T], rng: &mut impl Rng) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.gen_range(0..items.len()))
    }
}
