use serde::Serialize;

use super::ApiError;
use crate::role::models::Role;
use crate::role::models::RoleId;

pub mod create_role;
pub mod delete_role;
pub mod get_role;
pub mod list_roles;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleData {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

impl From<&Role> for RoleData {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.0,
            name: role.name.as_str().to_string(),
            description: role.description.clone(),
        }
    }
}

fn parse_role_id(raw: &str) -> Result<RoleId, ApiError> {
    raw.parse::<i32>()
        .map(RoleId)
        .map_err(|e| ApiError::BadRequest(format!("Invalid role id: {}: {}", raw, e)))
}
