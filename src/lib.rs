//! PROJTRACK - Multi-user project tracking web application
//!
//! Users register, log in, and manage project records that belong to
//! them; a public search page browses every project.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod projects;
pub mod session;
pub mod web;

pub use auth::{
    change_password, hash_password, login, needs_rehash, validate_password_strength,
    validate_registration, verify_password, AuthError, ChangePasswordRequest, PasswordError,
    RegistrationRequest, ValidationError,
};
pub use config::Config;
pub use db::{
    Database, NewProject, NewUser, Phase, Project, ProjectRepository, SearchFilter, User,
    UserRepository,
};
pub use error::{ProjtrackError, Result};
pub use session::{
    LoadedSession, MemorySessionStore, Session, SessionManager, SessionStore, SessionUser,
};
