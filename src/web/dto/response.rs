//! Response DTOs for the Web API.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::{Phase, Project, ProjectWithOwner, User};

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Simple success message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation.
    pub message: String,
}

impl MessageResponse {
    /// Create a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Current session state (stand-in for the hidden form fields the
/// HTML layer would embed).
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// Whether a user is logged in.
    pub authenticated: bool,
    /// Username, when logged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// First name for greeting display, when logged in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub firstname: Option<String>,
    /// The session's CSRF token.
    pub csrf_token: String,
}

/// Login page state.
#[derive(Debug, Serialize)]
pub struct LoginPageResponse {
    /// True when the visitor was redirected here by session expiry.
    pub expired: bool,
    /// The session's CSRF token for the login form.
    pub csrf_token: String,
}

/// A project as shown to its owner.
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    /// Project ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Short description.
    pub short_description: String,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Lifecycle phase.
    pub phase: Phase,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            title: project.title,
            short_description: project.short_description,
            start_date: project.start_date,
            end_date: project.end_date,
            phase: project.phase,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// A project as shown on the public search page.
#[derive(Debug, Serialize)]
pub struct PublicProjectResponse {
    /// Project ID.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Short description.
    pub short_description: String,
    /// Start date.
    pub start_date: NaiveDate,
    /// End date, if set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Lifecycle phase.
    pub phase: Phase,
    /// Owner's username; partially masked for anonymous viewers.
    pub owner: String,
    /// Owner's contact email; only shown to logged-in viewers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    /// Last update timestamp.
    pub updated_at: String,
}

impl PublicProjectResponse {
    /// Build the public view of a project.
    ///
    /// For anonymous viewers the owner's username keeps only its first
    /// character and the contact email is withheld.
    pub fn new(project: ProjectWithOwner, authenticated: bool) -> Self {
        let owner = if authenticated {
            project.username
        } else {
            redact_username(&project.username)
        };
        let contact_email = authenticated.then_some(project.email);

        Self {
            id: project.id,
            title: project.title,
            short_description: project.short_description,
            start_date: project.start_date,
            end_date: project.end_date,
            phase: project.phase,
            owner,
            contact_email,
            updated_at: project.updated_at,
        }
    }
}

/// Public search results.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Number of matching projects.
    pub count: usize,
    /// Matching projects, newest first.
    pub projects: Vec<PublicProjectResponse>,
}

/// Profile page data.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Username.
    pub username: String,
    /// Full display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Registration timestamp.
    pub created_at: String,
    /// Number of projects owned.
    pub project_count: i64,
}

impl ProfileResponse {
    /// Build a profile response from a user row and project count.
    pub fn new(user: &User, project_count: i64) -> Self {
        Self {
            username: user.username.clone(),
            full_name: user.full_name(),
            email: user.email.clone(),
            created_at: user.created_at.clone(),
            project_count,
        }
    }
}

/// Mask a username down to its first character.
fn redact_username(username: &str) -> String {
    let mut chars = username.chars();
    match chars.next() {
        Some(first) => {
            let masked: String = chars.map(|_| '*').collect();
            format!("{first}{masked}")
        }
        None => String::new(),
    }
}
