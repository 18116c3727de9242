use auth::PasswordError;
use thiserror::Error;

use crate::role::models::RoleId;
use crate::user::models::CompanyId;
use crate::user::models::UserId;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid user id: {0}")]
    InvalidFormat(String),

    #[error("User id must be positive, got {0}")]
    NotPositive(i32),
}

/// Error for FullName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FullNameError {
    #[error("Full name cannot be empty")]
    Empty,

    #[error("Full name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for UserStatus parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserStatusError {
    #[error("Unknown status {0:?} (expected ACTIVE or NOT_ACTIVE)")]
    Unknown(String),
}

/// Error for PageRequest validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("Page must be at least 1, got {0}")]
    InvalidPage(u32),

    #[error("Page size must be between 1 and {max}, got {actual}")]
    InvalidPageSize { max: u32, actual: u32 },
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid full name: {0}")]
    InvalidFullName(#[from] FullNameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid status: {0}")]
    InvalidStatus(#[from] UserStatusError),

    #[error("Invalid page request: {0}")]
    InvalidPage(#[from] PageRequestError),

    // Domain-level errors
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Email {0} is already taken")]
    EmailAlreadyExists(String),

    #[error("Company id {0} is already taken")]
    CompanyIdAlreadyExists(CompanyId),

    #[error("Role does not exist: {0}")]
    UnknownRole(RoleId),

    #[error("Stored credential is malformed: {0}")]
    MalformedCredential(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<PasswordError> for UserError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::InvalidInput => UserError::Validation(err.to_string()),
            PasswordError::MalformedCredential { .. } => {
                UserError::MalformedCredential(err.to_string())
            }
            PasswordError::HashingFailed(_) => UserError::Unknown(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for UserError {
    fn from(err: anyhow::Error) -> Self {
        UserError::Unknown(err.to_string())
    }
}
