use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::account::authenticate::authenticate;
use super::handlers::account::change_password::change_password;
use super::handlers::account::delete_user::delete_user;
use super::handlers::account::get_user::get_user;
use super::handlers::account::list_users::list_users;
use super::handlers::account::list_users::list_users_page;
use super::handlers::account::new_password::new_password;
use super::handlers::account::register::register;
use super::handlers::account::update_user::update_user;
use super::handlers::roles::create_role::create_role;
use super::handlers::roles::delete_role::delete_role;
use super::handlers::roles::get_role::get_role;
use super::handlers::roles::list_roles::list_roles;
use super::middleware::require_admin;
use crate::role::ports::RoleServicePort;
use crate::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub role_service: Arc<dyn RoleServicePort>,
    pub token_issuer: Arc<TokenIssuer>,
    /// Role name a token must carry to reach the protected routes
    pub admin_role: String,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new().route("/api/account/authenticate", post(authenticate));

    let protected_routes = Router::new()
        .route("/api/account", get(list_users))
        .route("/api/account/page", get(list_users_page))
        .route("/api/account/register", post(register))
        .route("/api/account/change-password", post(change_password))
        .route("/api/account/new-password", post(new_password))
        .route(
            "/api/account/:user_id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/roles", get(list_roles).post(create_role))
        .route("/api/roles/:role_id", get(get_role).delete(delete_role))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::http::header;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use mockall::mock;
    use tower::ServiceExt;

    use super::*;
    use crate::audit::ActorContext;
    use crate::role::errors::RoleError;
    use crate::role::models::NewRole;
    use crate::role::models::Role;
    use crate::role::models::RoleId;
    use crate::user::errors::UserError;
    use crate::user::models::NewUser;
    use crate::user::models::PageRequest;
    use crate::user::models::UpdateUserCommand;
    use crate::user::models::User;
    use crate::user::models::UserId;

    mock! {
        pub Users {}

        #[async_trait]
        impl UserServicePort for Users {
            async fn authenticate(&self, email: &str, password: &str) -> Result<Option<User>, UserError>;
            async fn register(&self, user: NewUser, password: &str, actor: &ActorContext) -> Result<User, UserError>;
            async fn change_password(&self, id: UserId, new_password: &str, actor: &ActorContext) -> Result<bool, UserError>;
            async fn change_password_verified(&self, id: UserId, new_password: &str, old_password: &str, actor: &ActorContext) -> Result<bool, UserError>;
            async fn update_user(&self, command: UpdateUserCommand, actor: &ActorContext) -> Result<(), UserError>;
            async fn get_user(&self, id: UserId) -> Result<User, UserError>;
            async fn list_users(&self) -> Result<Vec<User>, UserError>;
            async fn list_users_page(&self, page: PageRequest) -> Result<Vec<User>, UserError>;
            async fn delete_user(&self, id: UserId) -> Result<bool, UserError>;
        }
    }

    mock! {
        pub Roles {}

        #[async_trait]
        impl RoleServicePort for Roles {
            async fn create_role(&self, role: NewRole) -> Result<Role, RoleError>;
            async fn get_role(&self, id: RoleId) -> Result<Role, RoleError>;
            async fn list_roles(&self) -> Result<Vec<Role>, RoleError>;
            async fn delete_role(&self, id: RoleId) -> Result<(), RoleError>;
        }
    }

    const SECRET: &[u8] = b"router-test-secret";

    fn router(users: MockUsers, roles: MockRoles) -> Router {
        create_router(AppState {
            user_service: Arc::new(users),
            role_service: Arc::new(roles),
            token_issuer: Arc::new(TokenIssuer::new(SECRET)),
            admin_role: "Administrator".to_string(),
        })
    }

    fn token(role: &str) -> String {
        TokenIssuer::new(SECRET)
            .issue(&auth::Identity {
                subject: "1".to_string(),
                name: "Root Admin".to_string(),
                email: "admin@example.com".to_string(),
                role: Some(role.to_string()),
            })
            .unwrap()
            .access_token
    }

    async fn body_json(response: Response<Body>) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_is_public() {
        let mut users = MockUsers::new();
        users
            .expect_authenticate()
            .times(1)
            .returning(|_, _| Ok(None));

        let request = Request::builder()
            .method("POST")
            .uri("/api/account/authenticate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"email":"a@example.com","password":"pw"}"#))
            .unwrap();

        let response = router(users, MockRoles::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["message"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_protected_route_rejects_missing_token() {
        let mut users = MockUsers::new();
        users.expect_list_users().times(0);

        let request = Request::builder()
            .uri("/api/account")
            .body(Body::empty())
            .unwrap();

        let response = router(users, MockRoles::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["status_code"], 401);
    }

    #[tokio::test]
    async fn test_protected_route_rejects_other_roles() {
        let mut roles = MockRoles::new();
        roles.expect_list_roles().times(0);

        let request = Request::builder()
            .uri("/api/roles")
            .header(header::AUTHORIZATION, format!("Bearer {}", token("Manager")))
            .body(Body::empty())
            .unwrap();

        let response = router(MockUsers::new(), roles).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_reaches_handler() {
        let mut roles = MockRoles::new();
        roles.expect_list_roles().times(1).returning(|| Ok(vec![]));

        let request = Request::builder()
            .uri("/api/roles")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", token("Administrator")),
            )
            .body(Body::empty())
            .unwrap();

        let response = router(MockUsers::new(), roles).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_static_page_route_wins_over_id() {
        let mut users = MockUsers::new();
        users
            .expect_list_users_page()
            .withf(|page| page.page() == 1 && page.page_size() == 5)
            .times(1)
            .returning(|_| Ok(vec![]));
        users.expect_get_user().times(0);

        let request = Request::builder()
            .uri("/api/account/page")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", token("Administrator")),
            )
            .body(Body::empty())
            .unwrap();

        let response = router(users, MockRoles::new()).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
