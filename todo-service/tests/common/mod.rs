#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::Json;
use axum::Router;
use chrono::DateTime;
use chrono::Utc;
use serde_json::json;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use todo_service::domain::auth::service::AuthService;
use todo_service::domain::task::service::TaskService;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::identity::GoogleIdentityProvider;
use todo_service::outbound::repositories::SqliteTaskRepository;
use todo_service::outbound::repositories::SqliteUserRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Access token the stub userinfo endpoint accepts for "Ada Lovelace".
pub const GOOGLE_TOKEN: &str = "google-token-ada";

/// Access token the stub userinfo endpoint answers with a profile lacking an email.
pub const GOOGLE_TOKEN_NO_EMAIL: &str = "google-token-no-email";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub pool: SqlitePool,
    pub api_client: reqwest::Client,
    pub token_service: Arc<TokenService>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let pool = test_pool().await;
        let userinfo_url = spawn_userinfo_stub().await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_service = Arc::new(TokenService::new(JWT_SECRET));
        let identity_provider = Arc::new(
            GoogleIdentityProvider::new(userinfo_url, Duration::from_secs(5))
                .expect("Failed to create identity provider"),
        );

        let auth_service = Arc::new(AuthService::new(
            Arc::new(SqliteUserRepository::new(pool.clone())),
            identity_provider,
            Arc::clone(&token_service),
        ));
        let task_service = Arc::new(TaskService::new(Arc::new(SqliteTaskRepository::new(
            pool.clone(),
        ))));

        let router = create_router(auth_service, task_service, Arc::clone(&token_service));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            pool,
            api_client: reqwest::Client::new(),
            token_service,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Register a user with a valid password and return the response body
    pub async fn register(&self, email: &str, first_name: &str, last_name: &str) -> Value {
        let response = self
            .post("/api/v1/auth/register")
            .json(&json!({
                "email": email,
                "first_name": first_name,
                "last_name": last_name,
                "password": "GoodPass1"
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Log in and return the `data` member holding the token pair
    pub async fn login(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/api/v1/auth/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Insert a task row directly
    pub async fn insert_task(
        &self,
        user_id: i64,
        title: &str,
        status: &str,
        created_at: DateTime<Utc>,
    ) -> i64 {
        insert_task(&self.pool, user_id, title, status, created_at).await
    }
}

/// Fresh migrated in-memory database.
///
/// A single connection that never expires keeps the in-memory database alive.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn insert_task(
    pool: &SqlitePool,
    user_id: i64,
    title: &str,
    status: &str,
    created_at: DateTime<Utc>,
) -> i64 {
    sqlx::query(
        r#"
        INSERT INTO tasks (user_id, title, description, status, created_at, updated_at)
        VALUES (?, ?, '', ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(title)
    .bind(status)
    .bind(created_at)
    .bind(created_at)
    .execute(pool)
    .await
    .expect("Failed to insert task")
    .last_insert_rowid()
}

async fn userinfo(headers: HeaderMap) -> Response {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match token {
        Some(GOOGLE_TOKEN) => Json(json!({
            "sub": "109876543210",
            "email": "ada.google@example.com",
            "name": "Ada King Lovelace",
            "picture": "https://example.com/ada.png"
        }))
        .into_response(),
        Some(GOOGLE_TOKEN_NO_EMAIL) => Json(json!({
            "sub": "109876543211",
            "name": "Nameless"
        }))
        .into_response(),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_token" })),
        )
            .into_response(),
    }
}

/// Serve a stand-in for the Google userinfo endpoint and return its URL
async fn spawn_userinfo_stub() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let router = Router::new().route("/userinfo", get(userinfo));
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("Stub server error");
    });

    format!("http://127.0.0.1:{}/userinfo", port)
}
