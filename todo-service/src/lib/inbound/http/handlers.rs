use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::IdentityProviderError;
use crate::domain::task::errors::TaskError;

pub mod google_callback;
pub mod list_tasks;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, message, Some(data))))
    }
}

impl ApiSuccess<()> {
    /// Success envelope without a `data` member.
    pub fn acknowledge(status: StatusCode, message: impl Into<String>) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, message, None)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    InvalidField {
        field: &'static str,
        message: String,
    },
    Conflict(String),
    Unauthorized(String),
}

impl ApiError {
    pub fn internal() -> Self {
        ApiError::InternalServerError("Internal server error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, field) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::InvalidField { field, message } => {
                (StatusCode::BAD_REQUEST, message, Some(field))
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
        };

        (status, Json(ApiResponseBody::new_error(status, message, field))).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        ApiError::BadRequest("Invalid request body".to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(e) => ApiError::InvalidField {
                field: e.field,
                message: e.reason,
            },
            AuthError::PasswordPolicy(e) => ApiError::BadRequest(e.to_string()),
            AuthError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials | AuthError::InvalidToken => {
                ApiError::Unauthorized(err.to_string())
            }
            AuthError::IdentityProvider(e) => match e {
                IdentityProviderError::Timeout => ApiError::InternalServerError(
                    "Timed out fetching user info from Google".to_string(),
                ),
                IdentityProviderError::InvalidProfile(_) => {
                    ApiError::InternalServerError("Failed to decode user info".to_string())
                }
                IdentityProviderError::RequestFailed(_) | IdentityProviderError::Rejected(_) => {
                    ApiError::InternalServerError(
                        "Failed to fetch user info from Google".to_string(),
                    )
                }
            },
            AuthError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                ApiError::internal()
            }
        }
    }
}

impl From<TaskError> for ApiError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::DatabaseError(msg) => {
                tracing::error!(error = %msg, "Task store failure");
                ApiError::internal()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    success: bool,
    status_code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: true,
            status_code: status_code.as_u16(),
            message: message.into(),
            data,
            field: None,
        }
    }
}

impl ApiResponseBody<()> {
    pub fn new_error(
        status_code: StatusCode,
        message: String,
        field: Option<&'static str>,
    ) -> Self {
        Self {
            success: false,
            status_code: status_code.as_u16(),
            message,
            data: None,
            field,
        }
    }
}
