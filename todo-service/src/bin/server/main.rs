use std::sync::Arc;

use auth::TokenService;
use sqlx::sqlite::SqlitePoolOptions;
use todo_service::config::Config;
use todo_service::domain::auth::service::AuthService;
use todo_service::domain::task::service::TaskService;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::identity::GoogleIdentityProvider;
use todo_service::outbound::repositories::SqliteTaskRepository;
use todo_service::outbound::repositories::SqliteUserRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "todo-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        access_token_minutes = config.jwt.access_token_minutes,
        refresh_token_hours = config.jwt.refresh_token_hours,
        google_userinfo_url = %config.identity.google_userinfo_url,
        "Configuration loaded"
    );

    let sqlite_pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "sqlite",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&sqlite_pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let token_service = Arc::new(TokenService::with_lifetimes(
        config.jwt.secret.as_bytes(),
        config.jwt.access_lifetime(),
        config.jwt.refresh_lifetime(),
    ));
    let user_repository = Arc::new(SqliteUserRepository::new(sqlite_pool.clone()));
    let task_repository = Arc::new(SqliteTaskRepository::new(sqlite_pool));
    let identity_provider = Arc::new(GoogleIdentityProvider::new(
        config.identity.google_userinfo_url.clone(),
        config.identity.request_timeout(),
    )?);

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        identity_provider,
        Arc::clone(&token_service),
    ));
    let task_service = Arc::new(TaskService::new(task_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, task_service, token_service);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
