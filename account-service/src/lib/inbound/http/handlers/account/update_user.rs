use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::field;
use super::parse_user_id;
use super::positive;
use crate::domain::user::models::CompanyId;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::role::models::RoleId;

/// Replace the profile fields of a user. The password is left untouched.
pub async fn update_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(user_id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<StatusCode, ApiError> {
    let user_id = parse_user_id(&user_id)?;
    let command = body.try_into_command(user_id)?;

    state
        .user_service
        .update_user(command, &caller.actor())
        .await?;

    Ok(StatusCode::OK)
}

/// HTTP request body for updating a user (raw JSON)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    full_name: Option<String>,
    email: Option<String>,
    position: Option<String>,
    role_id: Option<i32>,
    company_id: Option<i32>,
    status: Option<UserStatus>,
}

impl UpdateUserRequest {
    fn try_into_command(self, id: UserId) -> Result<UpdateUserCommand, ApiError> {
        let mut problems = Vec::new();

        let full_name = field(&mut problems, "fullName", self.full_name.map(FullName::new));
        let email = field(&mut problems, "email", self.email.map(EmailAddress::new));
        let role_id = field(&mut problems, "roleId", self.role_id.map(positive));
        let company_id = field(&mut problems, "companyId", self.company_id.map(positive));
        let status = field(
            &mut problems,
            "status",
            self.status.map(Ok::<_, std::convert::Infallible>),
        );

        match (full_name, email, role_id, company_id, status) {
            (Some(full_name), Some(email), Some(role_id), Some(company_id), Some(status))
                if problems.is_empty() =>
            {
                Ok(UpdateUserCommand {
                    id,
                    full_name,
                    email,
                    position: self
                        .position
                        .map(|p| p.trim().to_string())
                        .filter(|p| !p.is_empty()),
                    role_id: RoleId(role_id),
                    company_id: CompanyId(company_id),
                    status,
                })
            }
            _ => Err(ApiError::UnprocessableEntity(problems.join("; "))),
        }
    }
}
