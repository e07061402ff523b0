//! Project input handling for PROJTRACK.

mod validation;

pub use validation::{
    validate_project, ProjectInput, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH,
};
