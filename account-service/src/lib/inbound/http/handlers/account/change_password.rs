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

/// Change a password after checking the current one.
pub async fn change_password(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let user_id = UserId::new(body.id).map_err(UserError::from)?;
    check_confirmation(&body.new_password, &body.new_password_confirm)?;

    let changed = state
        .user_service
        .change_password_verified(
            user_id,
            &body.new_password,
            &body.old_password,
            &caller.actor(),
        )
        .await?;

    if !changed {
        return Err(ApiError::BadRequest(
            "User not found or old password is incorrect".to_string(),
        ));
    }

    Ok(StatusCode::OK)
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    id: i32,
    new_password: String,
    new_password_confirm: String,
    old_password: String,
}
