use std::fmt;

use crate::role::errors::RoleNameError;

/// Role unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoleId(pub i32);

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role name value type
///
/// Non-blank, at most 64 characters, surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleName(String);

impl RoleName {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid role name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 64 characters
    pub fn new(name: String) -> Result<Self, RoleNameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 {
            Err(RoleNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(RoleNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role entity. One role is referenced by many users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
    pub description: Option<String>,
}

/// Command to create a new role
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: RoleName,
    pub description: Option<String>,
}
