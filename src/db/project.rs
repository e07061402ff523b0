//! Project model for PROJTRACK.
//!
//! Defines the Project struct and the Phase enum describing project
//! lifecycle stages.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

/// Project lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Initial design work.
    #[default]
    Design,
    /// Active development.
    Development,
    /// Testing and QA.
    Testing,
    /// Deployment / rollout.
    Deployment,
    /// Finished.
    Complete,
}

impl Phase {
    /// Convert phase to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Design => "design",
            Phase::Development => "development",
            Phase::Testing => "testing",
            Phase::Deployment => "deployment",
            Phase::Complete => "complete",
        }
    }

    /// All phases in lifecycle order.
    pub fn all() -> &'static [Phase] {
        &[
            Phase::Design,
            Phase::Development,
            Phase::Testing,
            Phase::Deployment,
            Phase::Complete,
        ]
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Phase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "design" => Ok(Phase::Design),
            "development" => Ok(Phase::Development),
            "testing" => Ok(Phase::Testing),
            "deployment" => Ok(Phase::Deployment),
            "complete" => Ok(Phase::Complete),
            _ => Err(format!("unknown phase: {s}")),
        }
    }
}

impl TryFrom<String> for Phase {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl serde::Serialize for Phase {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Project entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Project {
    /// Unique project ID.
    pub id: i64,
    /// Owning user ID. Immutable after creation.
    pub owner_id: i64,
    /// Project title.
    pub title: String,
    /// Short description.
    pub short_description: String,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date (optional, never earlier than start_date).
    pub end_date: Option<NaiveDate>,
    /// Current lifecycle phase.
    #[sqlx(try_from = "String")]
    pub phase: Phase,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Data for creating a new project.
#[derive(Debug, Clone)]
pub struct NewProject {
    /// Owning user ID.
    pub owner_id: i64,
    /// Project title.
    pub title: String,
    /// Short description.
    pub short_description: String,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date (optional).
    pub end_date: Option<NaiveDate>,
    /// Lifecycle phase.
    pub phase: Phase,
}

/// A project joined with its owner's public identity, as returned by
/// the search query.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProjectWithOwner {
    /// Project ID.
    pub id: i64,
    /// Owning user ID.
    pub owner_id: i64,
    /// Project title.
    pub title: String,
    /// Short description.
    pub short_description: String,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date (optional).
    pub end_date: Option<NaiveDate>,
    /// Current lifecycle phase.
    #[sqlx(try_from = "String")]
    pub phase: Phase,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
    /// Owner's username.
    pub username: String,
    /// Owner's contact email.
    pub email: String,
}
