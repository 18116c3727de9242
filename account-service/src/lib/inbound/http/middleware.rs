use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::audit::ActorContext;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Caller identity taken from a validated bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub name: String,
    pub role: String,
}

impl AuthenticatedUser {
    /// Actor stamped into audit fields on writes made by this caller.
    pub fn actor(&self) -> ActorContext {
        ActorContext::new(self.name.as_str(), self.role.as_str())
    }
}

/// Middleware admitting only callers whose token carries the administrator role.
///
/// Adds [`AuthenticatedUser`] to the request extensions.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let claims = state.token_issuer.validate(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        ApiError::Unauthorized("Invalid or expired token".to_string())
    })?;

    if claims.role != state.admin_role {
        tracing::warn!(
            subject = %claims.sub,
            role = %claims.role,
            uri = %req.uri(),
            "Caller lacks the administrator role"
        );
        return Err(ApiError::Forbidden(
            "Administrator role required".to_string(),
        ));
    }

    req.extensions_mut().insert(AuthenticatedUser {
        subject: claims.sub,
        name: claims.name,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            )
        })
}
