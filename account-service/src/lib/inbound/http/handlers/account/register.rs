use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::field;
use super::positive;
use crate::domain::user::models::CompanyId;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UserStatus;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::role::models::RoleId;

/// Register a user with an initial password. Responds 201 with no body.
pub async fn register(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(body): Json<RegisterRequest>,
) -> Result<StatusCode, ApiError> {
    let (user, password) = body.try_into_parts()?;

    state
        .user_service
        .register(user, &password, &caller.actor())
        .await?;

    Ok(StatusCode::CREATED)
}

/// HTTP request body for registering a user (raw JSON)
///
/// Fields are optional on the wire; missing and invalid ones are reported
/// together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    full_name: Option<String>,
    email: Option<String>,
    position: Option<String>,
    role_id: Option<i32>,
    company_id: Option<i32>,
    status: Option<UserStatus>,
    password: Option<String>,
}

impl RegisterRequest {
    fn try_into_parts(self) -> Result<(NewUser, String), ApiError> {
        let mut problems = Vec::new();

        let full_name = field(&mut problems, "fullName", self.full_name.map(FullName::new));
        let email = field(&mut problems, "email", self.email.map(EmailAddress::new));
        let role_id = field(&mut problems, "roleId", self.role_id.map(positive));
        let company_id = field(&mut problems, "companyId", self.company_id.map(positive));
        let password = field(
            &mut problems,
            "password",
            self.password.map(|p| {
                if p.trim().is_empty() {
                    Err("must not be blank")
                } else {
                    Ok(p)
                }
            }),
        );

        match (full_name, email, role_id, company_id, password) {
            (Some(full_name), Some(email), Some(role_id), Some(company_id), Some(password))
                if problems.is_empty() =>
            {
                let user = NewUser {
                    full_name,
                    email,
                    position: self
                        .position
                        .map(|p| p.trim().to_string())
                        .filter(|p| !p.is_empty()),
                    role_id: RoleId(role_id),
                    company_id: CompanyId(company_id),
                    status: self.status.unwrap_or_default(),
                };
                Ok((user, password))
            }
            _ => Err(ApiError::UnprocessableEntity(problems.join("; "))),
        }
    }
}
