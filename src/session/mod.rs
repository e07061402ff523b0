//! Server-side session management for PROJTRACK.
//!
//! Sessions are keyed by an opaque random identifier carried in a
//! cookie. State lives in a process-wide store behind the
//! `SessionStore` trait; handlers receive the store through the
//! application state rather than any ambient global.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use rand_core::{OsRng, RngCore};
use subtle::ConstantTimeEq;
use tracing::{debug, info};

/// Default session inactivity timeout (15 minutes).
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 900;

/// Bytes of entropy in session identifiers and CSRF tokens.
const TOKEN_BYTES: usize = 32;

/// Generate an opaque hex token from 32 random bytes.
fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Identity attached to an authenticated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    /// User ID.
    pub id: i64,
    /// Username.
    pub username: String,
    /// First name, used for greeting display.
    pub firstname: String,
}

/// A visitor session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque session identifier (64 hex chars).
    pub id: String,
    /// Authenticated user, if any.
    pub user: Option<SessionUser>,
    /// CSRF token, generated once per session and never rotated.
    pub csrf_token: String,
    /// Timestamp of the last request seen on this session.
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Create a fresh anonymous session.
    pub fn new() -> Self {
        Self {
            id: generate_token(),
            user: None,
            csrf_token: generate_token(),
            last_activity: Utc::now(),
        }
    }

    /// Whether a user is attached.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Compare a submitted CSRF token against the session's token,
    /// byte for byte in constant time.
    pub fn verify_csrf(&self, submitted: &str) -> bool {
        let a = self.csrf_token.as_bytes();
        let b = submitted.as_bytes();
        a.len() == b.len() && bool::from(a.ct_eq(b))
    }

    /// Refresh the last-activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Storage interface for sessions.
///
/// Keyed by session ID. Implementations must be safe to share across
/// request handlers.
pub trait SessionStore: Send + Sync {
    /// Fetch a session by ID.
    fn get(&self, id: &str) -> Option<Session>;
    /// Insert or replace a session.
    fn put(&self, session: Session);
    /// Remove a session.
    fn delete(&self, id: &str);
    /// Number of live sessions.
    fn len(&self) -> usize;
    /// Whether the store is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory session store.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &str) -> Option<Session> {
        self.sessions.lock().expect("session store poisoned").get(id).cloned()
    }

    fn put(&self, session: Session) {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .insert(session.id.clone(), session);
    }

    fn delete(&self, id: &str) {
        self.sessions.lock().expect("session store poisoned").remove(id);
    }

    fn len(&self) -> usize {
        self.sessions.lock().expect("session store poisoned").len()
    }
}

/// Result of loading a session for a request.
#[derive(Debug, Clone)]
pub struct LoadedSession {
    /// The session (existing or freshly created).
    pub session: Session,
    /// True when the session was created by this load and the cookie
    /// still has to be issued.
    pub is_new: bool,
}

/// Session manager: load-or-create, inactivity expiry, identity
/// attachment.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    timeout: Duration,
}

impl SessionManager {
    /// Create a manager over the given store.
    pub fn new(store: Arc<dyn SessionStore>, timeout_secs: u64) -> Self {
        Self {
            store,
            timeout: Duration::seconds(timeout_secs as i64),
        }
    }

    /// Load the session named by the cookie, or create a fresh one if
    /// the cookie is absent or doesn't resolve.
    pub fn load_or_create(&self, cookie_value: Option<&str>) -> LoadedSession {
        if let Some(id) = cookie_value {
            if let Some(session) = self.store.get(id) {
                return LoadedSession {
                    session,
                    is_new: false,
                };
            }
        }

        let session = Session::new();
        debug!(session_id = %session.id, "Created new session");
        self.store.put(session.clone());
        LoadedSession {
            session,
            is_new: true,
        }
    }

    /// Whether the session has been inactive past the timeout.
    pub fn is_expired(&self, session: &Session) -> bool {
        Utc::now().signed_duration_since(session.last_activity) > self.timeout
    }

    /// Refresh the session's activity timestamp and persist it.
    pub fn touch(&self, session: &mut Session) {
        session.touch();
        self.store.put(session.clone());
    }

    /// Attach an authenticated identity to a session.
    pub fn attach_user(&self, session_id: &str, user: SessionUser) {
        if let Some(mut session) = self.store.get(session_id) {
            info!(session_id = %session_id, user_id = user.id, "User attached to session");
            session.user = Some(user);
            session.touch();
            self.store.put(session);
        }
    }

    /// Destroy a session entirely (logout, expiry).
    pub fn destroy(&self, session_id: &str) {
        debug!(session_id = %session_id, "Session destroyed");
        self.store.delete(session_id);
    }

    /// Fetch a session by ID.
    pub fn get(&self, session_id: &str) -> Option<Session> {
        self.store.get(session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(timeout_secs: u64) -> SessionManager {
        SessionManager::new(Arc::new(MemorySessionStore::new()), timeout_secs)
    }

    #[test]
    fn test_new_session_has_distinct_tokens() {
        let session = Session::new();
        assert_eq!(session.id.len(), 64);
        assert_eq!(session.csrf_token.len(), 64);
        assert_ne!(session.id, session.csrf_token);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_sessions_are_unique() {
        let a = Session::new();
        let b = Session::new();
        assert_ne!(a.id, b.id);
        assert_ne!(a.csrf_token, b.csrf_token);
    }

    #[test]
    fn test_verify_csrf() {
        let session = Session::new();
        let token = session.csrf_token.clone();

        assert!(session.verify_csrf(&token));
        assert!(!session.verify_csrf("wrong"));
        assert!(!session.verify_csrf(""));
        // Same length, different content
        let flipped: String = token
            .chars()
            .map(|c| if c == '0' { '1' } else { '0' })
            .collect();
        assert!(!session.verify_csrf(&flipped));
    }

    #[test]
    fn test_load_or_create_fresh() {
        let mgr = manager(900);
        let loaded = mgr.load_or_create(None);
        assert!(loaded.is_new);
        assert!(mgr.get(&loaded.session.id).is_some());
    }

    #[test]
    fn test_load_or_create_existing() {
        let mgr = manager(900);
        let first = mgr.load_or_create(None);

        let second = mgr.load_or_create(Some(&first.session.id));
        assert!(!second.is_new);
        assert_eq!(second.session.id, first.session.id);
        assert_eq!(second.session.csrf_token, first.session.csrf_token);
    }

    #[test]
    fn test_load_or_create_unknown_cookie() {
        let mgr = manager(900);
        let loaded = mgr.load_or_create(Some("stale-cookie-value"));
        assert!(loaded.is_new);
        assert_ne!(loaded.session.id, "stale-cookie-value");
    }

    #[test]
    fn test_expiry() {
        let mgr = manager(900);
        let mut loaded = mgr.load_or_create(None);
        assert!(!mgr.is_expired(&loaded.session));

        // Backdate last activity past the timeout
        loaded.session.last_activity = Utc::now() - Duration::seconds(901);
        assert!(mgr.is_expired(&loaded.session));

        // Touch refreshes it
        mgr.touch(&mut loaded.session);
        assert!(!mgr.is_expired(&loaded.session));
    }

    #[test]
    fn test_attach_user() {
        let mgr = manager(900);
        let loaded = mgr.load_or_create(None);

        mgr.attach_user(
            &loaded.session.id,
            SessionUser {
                id: 42,
                username: "jolee".to_string(),
                firstname: "Jo".to_string(),
            },
        );

        let session = mgr.get(&loaded.session.id).unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.user.as_ref().unwrap().id, 42);
        // CSRF token survives login untouched
        assert_eq!(session.csrf_token, loaded.session.csrf_token);
    }

    #[test]
    fn test_destroy() {
        let mgr = manager(900);
        let loaded = mgr.load_or_create(None);

        mgr.destroy(&loaded.session.id);
        assert!(mgr.get(&loaded.session.id).is_none());

        // A destroyed cookie value yields a brand-new session
        let again = mgr.load_or_create(Some(&loaded.session.id));
        assert!(again.is_new);
        assert_ne!(again.session.csrf_token, loaded.session.csrf_token);
    }

    #[test]
    fn test_store_len() {
        let store = MemorySessionStore::new();
        assert!(store.is_empty());
        store.put(Session::new());
        store.put(Session::new());
        assert_eq!(store.len(), 2);
    }
}
