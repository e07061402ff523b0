//! Request DTOs for the Web API.
//!
//! Forms arrive URL-encoded; every state-changing form carries the
//! session's CSRF token.

use serde::Deserialize;

/// Registration form.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// CSRF token.
    pub csrf_token: String,
    /// First name.
    pub firstname: String,
    /// Last name.
    pub lastname: String,
    /// Email address.
    pub email: String,
    /// Desired username.
    pub username: String,
    /// Password.
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
}

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// CSRF token.
    pub csrf_token: String,
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Project create/edit form.
#[derive(Debug, Deserialize)]
pub struct ProjectForm {
    /// CSRF token.
    pub csrf_token: String,
    /// Project title.
    pub title: String,
    /// Short description.
    pub short_description: String,
    /// Start date (ISO).
    pub start_date: String,
    /// End date (ISO), empty for none.
    #[serde(default)]
    pub end_date: String,
    /// Lifecycle phase.
    pub phase: String,
}

/// Password-change form.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    /// CSRF token.
    pub csrf_token: String,
    /// Current password.
    pub current_password: String,
    /// New password.
    pub new_password: String,
    /// Confirmation of the new password.
    pub confirm_new_password: String,
}

/// Query parameters for the delete confirmation link.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    /// Project ID.
    pub pid: Option<i64>,
    /// CSRF token.
    pub csrf: Option<String>,
}

/// Query parameters for the public project search.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Title substring filter.
    #[serde(default)]
    pub title: Option<String>,
    /// Owner username substring filter.
    #[serde(default)]
    pub username: Option<String>,
    /// Exact phase filter.
    #[serde(default)]
    pub phase: Option<String>,
    /// Start-on-or-after date filter.
    #[serde(default)]
    pub start_date: Option<String>,
}
