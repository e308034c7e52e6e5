use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::IdentityProviderError;
use crate::domain::auth::models::AuthTokens;
use crate::domain::auth::models::ExternalProfile;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;

/// Port for authentication flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a local user.
    ///
    /// # Errors
    /// * `Validation` - Missing field or malformed email (first in field order)
    /// * `PasswordPolicy` - Password too short or too weak
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Internal` - Hashing or store failure
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError>;

    /// Verify credentials and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `Internal` - Token signing failed
    async fn login(&self, command: LoginCommand) -> Result<AuthTokens, AuthError>;

    /// Issue a new access token from a refresh token.
    ///
    /// The refresh token itself is returned unchanged.
    ///
    /// # Errors
    /// * `InvalidToken` - Token invalid/expired or its subject no longer exists
    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthTokens, AuthError>;

    /// Sign in with a third-party access token, creating the local user on
    /// first sight.
    ///
    /// # Errors
    /// * `IdentityProvider` - Profile fetch failed or timed out
    /// * `Internal` - Local user could not be created or tokens not issued
    async fn link_external_identity(&self, access_token: &str) -> Result<AuthTokens, AuthError>;

    /// Acknowledge a logout. Tokens are stateless, so nothing is invalidated.
    async fn logout(&self, user_id: &UserId);
}

/// Third-party identity provider (Google userinfo).
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Fetch the profile owning `access_token`.
    ///
    /// # Errors
    /// * `Timeout` - Provider did not answer in time
    /// * `RequestFailed` - Transport-level failure
    /// * `Rejected` - Provider answered with a non-success status
    /// * `InvalidProfile` - Response body missing email or undecodable
    async fn fetch_profile(&self, access_token: &str)
        -> Result<ExternalProfile, IdentityProviderError>;
}
