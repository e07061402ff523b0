//! Middleware for the PROJTRACK web layer.

mod auth;
mod session;

pub use auth::{AuthRedirect, CurrentUser};
pub use session::{session_layer, SESSION_COOKIE};
