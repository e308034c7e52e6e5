use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::login::TokenPairData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    payload: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .refresh_token(&body.refresh_token)
        .await
        .map_err(|e| match e {
            AuthError::InvalidToken => ApiError::Unauthorized("Invalid refresh token".to_string()),
            _ => ApiError::from(e),
        })
        .map(|tokens| {
            ApiSuccess::new(StatusCode::OK, "Token refreshed successfully", tokens.into())
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequest {
    #[serde(default)]
    refresh_token: String,
}
