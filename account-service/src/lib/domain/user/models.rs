use std::fmt;
use std::str::FromStr;

use auth::Identity;
use auth::PasswordCredential;
use serde::Deserialize;
use serde::Serialize;

use crate::audit::AuditTrail;
use crate::role::models::Role;
use crate::role::models::RoleId;
use crate::user::errors::EmailError;
use crate::user::errors::FullNameError;
use crate::user::errors::PageRequestError;
use crate::user::errors::UserIdError;
use crate::user::errors::UserStatusError;

/// User aggregate entity.
///
/// Owns its password credential inline. `role` is the joined role record and
/// is only present on users loaded from the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub full_name: FullName,
    pub email: EmailAddress,
    pub position: Option<String>,
    pub role_id: RoleId,
    pub role: Option<Role>,
    pub company_id: CompanyId,
    pub status: UserStatus,
    pub credential: Option<PasswordCredential>,
    pub audit: AuditTrail,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn role_name(&self) -> Option<&str> {
        self.role.as_ref().map(|role| role.name.as_str())
    }

    /// Identity claims for a session token.
    pub fn identity(&self) -> Identity {
        Identity {
            subject: self.id.to_string(),
            name: self.full_name.as_str().to_string(),
            email: self.email.as_str().to_string(),
            role: self.role_name().map(str::to_string),
        }
    }
}

/// User unique identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i32);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not an integer
    /// * `NotPositive` - Integer is zero or negative
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        let id = s
            .parse::<i32>()
            .map_err(|e| UserIdError::InvalidFormat(format!("{}: {}", s, e)))?;
        Self::new(id)
    }

    /// Wrap a raw identifier received from a client.
    ///
    /// # Errors
    /// * `NotPositive` - Identifier is zero or negative
    pub fn new(id: i32) -> Result<Self, UserIdError> {
        if id > 0 {
            Ok(Self(id))
        } else {
            Err(UserIdError::NotPositive(id))
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Company-issued identifier, unique per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompanyId(pub i32);

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Full name value type
///
/// Non-blank, at most 128 characters, surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullName(String);

impl FullName {
    const MAX_LENGTH: usize = 128;

    /// Create a new valid full name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 128 characters
    pub fn new(name: String) -> Result<Self, FullNameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 {
            Err(FullNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(FullNameError::TooLong {
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

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Kept exactly as
/// given: lookups and uniqueness are case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Account status. Inactive accounts cannot sign in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    NotActive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::NotActive => "NOT_ACTIVE",
        }
    }
}

impl FromStr for UserStatus {
    type Err = UserStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(UserStatus::Active),
            "NOT_ACTIVE" => Ok(UserStatus::NotActive),
            other => Err(UserStatusError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user about to be registered (no id, no credential yet).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub full_name: FullName,
    pub email: EmailAddress,
    pub position: Option<String>,
    pub role_id: RoleId,
    pub company_id: CompanyId,
    pub status: UserStatus,
}

/// Command to replace the editable profile fields of an existing user.
/// Carries no credential.
#[derive(Debug, Clone)]
pub struct UpdateUserCommand {
    pub id: UserId,
    pub full_name: FullName,
    pub email: EmailAddress,
    pub position: Option<String>,
    pub role_id: RoleId,
    pub company_id: CompanyId,
    pub status: UserStatus,
}

/// Columns a partial update may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    FullName,
    Email,
    Position,
    CompanyId,
    Role,
    Status,
    /// Hash and salt, always written together.
    Credential,
}

impl UserField {
    /// Fields written by a profile update.
    pub const PROFILE: [UserField; 6] = [
        UserField::FullName,
        UserField::Email,
        UserField::Position,
        UserField::CompanyId,
        UserField::Role,
        UserField::Status,
    ];
}

/// One page of a listing, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_PAGE_SIZE: u32 = 5;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// # Errors
    /// * `InvalidPage` - Page is zero
    /// * `InvalidPageSize` - Page size is zero or above 100
    pub fn new(page: u32, page_size: u32) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::InvalidPage(page));
        }
        if page_size == 0 || page_size > Self::MAX_PAGE_SIZE {
            return Err(PageRequestError::InvalidPageSize {
                max: Self::MAX_PAGE_SIZE,
                actual: page_size,
            });
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: Self::DEFAULT_PAGE,
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }
}
