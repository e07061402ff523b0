//! Request handlers for the PROJTRACK Web API.

mod auth;
mod profile;
mod projects;
mod search;

pub use auth::{login, login_page, logout, register, session_info};
pub use profile::{change_password, profile};
pub use projects::{create_project, delete_project, edit_project_form, my_projects, update_project};
pub use search::search_projects;

use std::sync::Arc;

use crate::auth::LockoutPolicy;
use crate::config::SecurityConfig;
use crate::db::Database;
use crate::session::{MemorySessionStore, SessionManager, SessionStore};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Session manager over the process-wide session store.
    pub sessions: SessionManager,
    /// Login lockout policy.
    pub lockout: LockoutPolicy,
}

impl AppState {
    /// Create application state with an in-memory session store.
    pub fn new(db: Database, security: &SecurityConfig) -> Self {
        Self::with_session_store(db, Arc::new(MemorySessionStore::new()), security)
    }

    /// Create application state over a specific session store.
    pub fn with_session_store(
        db: Database,
        store: Arc<dyn SessionStore>,
        security: &SecurityConfig,
    ) -> Self {
        Self {
            db,
            sessions: SessionManager::new(store, security.session_timeout_secs),
            lockout: LockoutPolicy::from(security),
        }
    }
}
