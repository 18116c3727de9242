use axum::extract::State;
use axum::http::StatusCode;

use super::RoleData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::role::ports::RoleServicePort;

pub async fn list_roles(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<RoleData>>, ApiError> {
    state
        .role_service
        .list_roles()
        .await
        .map_err(ApiError::from)
        .map(|roles| ApiSuccess::new(StatusCode::OK, roles.iter().map(RoleData::from).collect()))
}
