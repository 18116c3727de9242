use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::RoleData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::role::errors::RoleError;
use crate::role::models::NewRole;
use crate::role::models::RoleName;
use crate::role::ports::RoleServicePort;

pub async fn create_role(
    State(state): State<AppState>,
    Json(body): Json<CreateRoleRequest>,
) -> Result<ApiSuccess<RoleData>, ApiError> {
    let role = NewRole {
        name: RoleName::new(body.name).map_err(RoleError::from)?,
        description: body
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
    };

    state
        .role_service
        .create_role(role)
        .await
        .map_err(ApiError::from)
        .map(|ref role| ApiSuccess::new(StatusCode::CREATED, role.into()))
}

/// HTTP request body for creating a role (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRoleRequest {
    name: String,
    description: Option<String>,
}
