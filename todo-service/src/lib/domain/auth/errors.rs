use thiserror::Error;

use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserError;
use crate::user::errors::ValidationError;

/// Error for third-party identity provider calls
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityProviderError {
    #[error("Identity provider request timed out")]
    Timeout,

    #[error("Identity provider request failed: {0}")]
    RequestFailed(String),

    #[error("Identity provider rejected the token with status {0}")]
    Rejected(u16),

    #[error("Identity provider returned an invalid profile: {0}")]
    InvalidProfile(String),
}

/// Top-level error for authentication flows
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    PasswordPolicy(#[from] PasswordPolicyError),

    #[error("user with this email already exists")]
    EmailAlreadyExists(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error(transparent)]
    IdentityProvider(#[from] IdentityProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::EmailAlreadyExists(email),
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) | UserError::DatabaseError(_) => {
                AuthError::Internal(err.to_string())
            }
        }
    }
}

impl From<auth::TokenError> for AuthError {
    fn from(err: auth::TokenError) -> Self {
        match err {
            auth::TokenError::InvalidToken => AuthError::InvalidToken,
            auth::TokenError::SigningFailed(_) => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
