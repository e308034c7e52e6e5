use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    Extension(authenticated_user): Extension<AuthenticatedUser>,
) -> ApiSuccess<()> {
    state.auth_service.logout(&authenticated_user.user_id).await;

    ApiSuccess::acknowledge(StatusCode::OK, "Logged out successfully")
}
