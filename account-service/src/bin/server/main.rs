use std::sync::Arc;

use account_service::bootstrap::bootstrap_administrator;
use account_service::config::Config;
use account_service::inbound::http::router::create_router;
use account_service::inbound::http::router::AppState;
use account_service::repositories::PostgresRoleRepository;
use account_service::repositories::PostgresUserRepository;
use account_service::role::service::RoleService;
use account_service::user::service::UserService;
use auth::TokenIssuer;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        max_connections = config.database.max_connections,
        token_lifetime_days = config.jwt.expiration_days,
        admin_role = %config.access.admin_role,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let token_issuer = Arc::new(TokenIssuer::with_lifetime(
        config.jwt.secret.as_bytes(),
        Duration::days(config.jwt.expiration_days),
    ));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let role_repository = Arc::new(PostgresRoleRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(user_repository));
    let role_service = Arc::new(RoleService::new(role_repository));

    match &config.bootstrap {
        Some(settings) => {
            bootstrap_administrator(
                &*user_service,
                &*role_service,
                &config.access.admin_role,
                settings,
            )
            .await?;
        }
        None => tracing::info!("No bootstrap administrator configured"),
    }

    let state = AppState {
        user_service,
        role_service,
        token_issuer,
        admin_role: config.access.admin_role.clone(),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    tracing::info!("Server exited");
    Ok(())
}
