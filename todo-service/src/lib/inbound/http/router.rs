use std::sync::Arc;
use std::time::Duration;

use auth::TokenService;
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

use super::handlers::google_callback::google_callback;
use super::handlers::list_tasks::list_tasks;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::refresh_token::refresh_token;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::service::AuthService;
use crate::domain::task::service::TaskService;
use crate::outbound::identity::GoogleIdentityProvider;
use crate::outbound::repositories::SqliteTaskRepository;
use crate::outbound::repositories::SqliteUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService<SqliteUserRepository, GoogleIdentityProvider>>,
    pub task_service: Arc<TaskService<SqliteTaskRepository>>,
    pub token_service: Arc<TokenService>,
}

pub fn create_router(
    auth_service: Arc<AuthService<SqliteUserRepository, GoogleIdentityProvider>>,
    task_service: Arc<TaskService<SqliteTaskRepository>>,
    token_service: Arc<TokenService>,
) -> Router {
    let state = AppState {
        auth_service,
        task_service,
        token_service,
    };

    let public_routes = Router::new()
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/refresh-token", post(refresh_token))
        .route("/api/v1/auth/google/callback", post(google_callback));

    let protected_routes = Router::new()
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/tasks", get(list_tasks))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

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
