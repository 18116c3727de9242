use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use super::UserData;
use crate::domain::user::models::PageRequest;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect()))
}

/// One page of users ordered by id. Defaults to page 1 of 5.
pub async fn list_users_page(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    let page = PageRequest::new(
        params.page.unwrap_or(PageRequest::DEFAULT_PAGE),
        params.page_size.unwrap_or(PageRequest::DEFAULT_PAGE_SIZE),
    )
    .map_err(UserError::from)?;

    state
        .user_service
        .list_users_page(page)
        .await
        .map_err(ApiError::from)
        .map(|users| ApiSuccess::new(StatusCode::OK, users.iter().map(UserData::from).collect()))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    page: Option<u32>,
    page_size: Option<u32>,
}
