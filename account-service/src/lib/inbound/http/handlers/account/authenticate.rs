use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Exchange an email and password for a session token.
///
/// Unknown email and wrong password are reported identically. Inactive
/// accounts are refused after their password has verified.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<AuthenticateResponseData>, ApiError> {
    let user = state
        .user_service
        .authenticate(&body.email, &body.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    if !user.is_active() {
        tracing::info!(user_id = %user.id, "Sign-in refused for inactive account");
        return Err(ApiError::Forbidden(
            "Account is disabled, please contact support".to_string(),
        ));
    }

    let token = state.token_issuer.issue(&user.identity()).map_err(|e| {
        ApiError::InternalServerError(format!("Token generation failed: {}", e))
    })?;

    tracing::info!(user_id = %user.id, expires_at = %token.expires_at, "Session token issued");

    Ok(ApiSuccess::new(
        StatusCode::OK,
        AuthenticateResponseData {
            id: user.id.0,
            email: user.email.as_str().to_string(),
            full_name: user.full_name.as_str().to_string(),
            role_id: user.role_id.0,
            token: token.access_token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthenticateRequestBody {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateResponseData {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub role_id: i32,
    pub token: String,
}
