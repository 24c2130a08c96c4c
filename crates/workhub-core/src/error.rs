use thiserror::Error;

use crate::models::{ValidationError, join_validation_errors};

/// Errors returned by hub operations.
#[derive(Debug, Error)]
pub enum HubError {
    /// Deliberately does not say which half of the pair was wrong.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(String),

    #[error("Workspace already exists: {0}")]
    WorkspaceExists(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("File content is no longer available: {0}")]
    ContentUnavailable(String),

    #[error("Validation failed: {}", join_validation_errors(.0))]
    Validation(Vec<ValidationError>),

    #[error("Invalid view transition: {0}")]
    InvalidTransition(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HubError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        HubError::Validation(vec![ValidationError::new(field, message)])
    }
}

impl From<Vec<ValidationError>> for HubError {
    fn from(errors: Vec<ValidationError>) -> Self {
        HubError::Validation(errors)
    }
}

impl From<ValidationError> for HubError {
    fn from(error: ValidationError) -> Self {
        HubError::Validation(vec![error])
    }
}

pub type HubResult<T> = std::result::Result<T, HubError>;
