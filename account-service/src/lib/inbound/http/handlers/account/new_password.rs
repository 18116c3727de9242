use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::check_confirmation;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Administrative password reset; the current password is not required.
pub async fn new_password(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<NewPasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let user_id = UserId::new(body.id).map_err(UserError::from)?;
    check_confirmation(&body.new_password, &body.new_password_confirm)?;

    let changed = state
        .user_service
        .change_password(user_id, &body.new_password, &caller.actor())
        .await?;

    if !changed {
        return Err(ApiError::BadRequest("User not found".to_string()));
    }

    Ok(StatusCode::OK)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPasswordRequest {
    id: i32,
    new_password: String,
    new_password_confirm: String,
}
