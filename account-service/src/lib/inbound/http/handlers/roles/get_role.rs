use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_role_id;
use super::RoleData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::role::ports::RoleServicePort;

pub async fn get_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Result<ApiSuccess<RoleData>, ApiError> {
    let role_id = parse_role_id(&role_id)?;

    state
        .role_service
        .get_role(role_id)
        .await
        .map_err(ApiError::from)
        .map(|ref role| ApiSuccess::new(StatusCode::OK, role.into()))
}
