use thiserror::Error;

/// Error for RoleName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleNameError {
    #[error("Role name cannot be empty")]
    Empty,

    #[error("Role name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for all role-related operations
#[derive(Debug, Clone, Error)]
pub enum RoleError {
    #[error("Invalid role name: {0}")]
    InvalidName(#[from] RoleNameError),

    #[error("Role not found: {0}")]
    NotFound(String),

    #[error("Role name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Role {role} is still assigned to {users} user(s)")]
    InUse { role: String, users: i64 },

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for RoleError {
    fn from(err: anyhow::Error) -> Self {
        RoleError::Unknown(err.to_string())
    }
}
