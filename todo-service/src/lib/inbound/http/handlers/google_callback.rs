use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::login::TokenPairData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

/// Exchange a Google access token for this service's own token pair.
pub async fn google_callback(
    State(state): State<AppState>,
    payload: Result<Json<GoogleCallbackRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenPairData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .link_external_identity(&body.access_token)
        .await
        .map_err(ApiError::from)
        .map(|tokens| ApiSuccess::new(StatusCode::OK, "Google account verified", tokens.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoogleCallbackRequest {
    #[serde(default)]
    access_token: String,
}
