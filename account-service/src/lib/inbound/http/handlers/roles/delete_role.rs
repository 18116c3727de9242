use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_role_id;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::role::ports::RoleServicePort;

/// Delete a role. Refused with 409 while users still reference it.
pub async fn delete_role(
    State(state): State<AppState>,
    Path(role_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let role_id = parse_role_id(&role_id)?;

    state
        .role_service
        .delete_role(role_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
