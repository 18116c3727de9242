use std::fmt::Display;

use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;

pub mod authenticate;
pub mod change_password;
pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod new_password;
pub mod register;
pub mod update_user;

/// Public view of a user. Never carries credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub position: Option<String>,
    pub role_id: i32,
    pub role_name: Option<String>,
    pub company_id: i32,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.0,
            full_name: user.full_name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            position: user.position.clone(),
            role_id: user.role_id.0,
            role_name: user.role_name().map(str::to_string),
            company_id: user.company_id.0,
            status: user.status,
            created_at: user.audit.created_at,
            created_by: user.audit.created_by.clone(),
            modified_at: user.audit.modified_at,
            modified_by: user.audit.modified_by.clone(),
        }
    }
}

pub(super) fn parse_user_id(raw: &str) -> Result<UserId, ApiError> {
    UserId::from_string(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Validate one request field, recording what is wrong with it.
///
/// # Returns
/// The parsed value, or `None` after pushing a message to `problems`
fn field<T, E: Display>(
    problems: &mut Vec<String>,
    name: &str,
    value: Option<Result<T, E>>,
) -> Option<T> {
    match value {
        Some(Ok(value)) => Some(value),
        Some(Err(e)) => {
            problems.push(format!("{}: {}", name, e));
            None
        }
        None => {
            problems.push(format!("{} is required", name));
            None
        }
    }
}

fn positive(value: i32) -> Result<i32, String> {
    if value > 0 {
        Ok(value)
    } else {
        Err(format!("must be positive, got {}", value))
    }
}

/// Body rejected when a new password does not match its confirmation.
fn check_confirmation(new_password: &str, confirmation: &str) -> Result<(), ApiError> {
    if new_password != confirmation {
        return Err(ApiError::UnprocessableEntity(
            "New password and confirmation do not match".to_string(),
        ));
    }
    Ok(())
}
