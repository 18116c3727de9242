use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_user_id;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let user_id = parse_user_id(&user_id)?;

    let deleted = state.user_service.delete_user(user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("User not found: {}", user_id)));
    }

    Ok(ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
