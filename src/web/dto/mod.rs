//! Request and response DTOs for the Web API.

mod request;
mod response;

pub use request::{
    ChangePasswordForm, DeleteParams, LoginForm, ProjectForm, RegisterForm, SearchParams,
};
pub use response::{
    ApiResponse, LoginPageResponse, MessageResponse, ProfileResponse, ProjectResponse,
    PublicProjectResponse, SearchResponse, SessionResponse,
};
