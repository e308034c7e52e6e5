use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::IssueOptions;
use auth::PasswordHasher;
use auth::TokenService;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthTokens;
use crate::domain::auth::models::ExternalProfile;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::IdentityProvider;
use crate::domain::user::models::split_display_name;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::Password;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Authentication flow service.
///
/// All collaborators are injected once at startup and shared read-only.
pub struct AuthService<UR, IP>
where
    UR: UserRepository,
    IP: IdentityProvider,
{
    repository: Arc<UR>,
    identity_provider: Arc<IP>,
    token_service: Arc<TokenService>,
    password_hasher: PasswordHasher,
}

impl<UR, IP> AuthService<UR, IP>
where
    UR: UserRepository,
    IP: IdentityProvider,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User record store
    /// * `identity_provider` - Third-party profile lookup
    /// * `token_service` - Token issuer/verifier shared with the request gate
    pub fn new(
        repository: Arc<UR>,
        identity_provider: Arc<IP>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            repository,
            identity_provider,
            token_service,
            password_hasher: PasswordHasher::new(),
        }
    }

    async fn find_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<User, UserError> {
        self.repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::NotFoundByEmail(email.to_string()))
    }

    fn claims_for(user: &User) -> Claims {
        Claims::for_user(user.id, user.email.as_str(), user.display_name())
    }

    fn issue_session(&self, user: &User) -> Result<AuthTokens, AuthError> {
        let pair = self
            .token_service
            .issue(Self::claims_for(user), IssueOptions::with_refresh())?;

        let refresh_token = pair
            .refresh_token
            .ok_or_else(|| AuthError::Internal("refresh token was not issued".to_string()))?;

        Ok(AuthTokens {
            access_token: pair.access_token,
            refresh_token,
        })
    }

    async fn create_oauth_user(&self, profile: &ExternalProfile) -> Result<User, AuthError> {
        let (first_name, last_name) = split_display_name(&profile.name);

        let user_profile = UserProfile::new(profile.email.clone(), first_name, last_name)
            .map_err(|e| {
                tracing::error!(error = %e, "External profile failed validation");
                AuthError::Internal("Failed to save user".to_string())
            })?;

        match self
            .repository
            .create(NewUser::oauth(user_profile, profile.picture.clone()))
            .await
        {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "User created from external identity");
                Ok(user)
            }
            // Lost a race with a concurrent first sign-in for the same email.
            Err(UserError::EmailAlreadyExists(email)) => self
                .find_user_by_email(&email)
                .await
                .map_err(AuthError::from),
            Err(e) => {
                tracing::error!(error = %e, "Failed to save external identity user");
                Err(AuthError::Internal("Failed to save user".to_string()))
            }
        }
    }
}

#[async_trait]
impl<UR, IP> AuthServicePort for AuthService<UR, IP>
where
    UR: UserRepository,
    IP: IdentityProvider,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        let (profile, password) = command.into_parts()?;
        let password = Password::new(password)?;

        let password_hash = self.password_hasher.hash(password.as_str())?;
        drop(password);

        let user = self
            .repository
            .create(NewUser::local(profile, password_hash))
            .await
            .map_err(|e| {
                if !matches!(e, UserError::EmailAlreadyExists(_)) {
                    tracing::error!(error = %e, "Failed to persist registered user");
                }
                AuthError::from(e)
            })?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthTokens, AuthError> {
        let user = self.find_user_by_email(&command.email).await.map_err(|e| {
            tracing::debug!(error = %e, "Login lookup failed");
            AuthError::InvalidCredentials
        })?;

        if !self
            .password_hasher
            .verify(&command.password, &user.password_hash)
        {
            tracing::debug!(user_id = %user.id, "Login password mismatch");
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = self.issue_session(&user)?;
        tracing::info!(user_id = %user.id, "User logged in");
        Ok(tokens)
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthTokens, AuthError> {
        let subject = self.token_service.verify(refresh_token)?;
        let user_id = UserId::from_string(&subject).map_err(|_| AuthError::InvalidToken)?;

        let user = self.find_user(&user_id).await.map_err(|e| {
            tracing::warn!(error = %e, "Refresh token subject could not be loaded");
            AuthError::InvalidToken
        })?;

        let pair = self
            .token_service
            .issue(Self::claims_for(&user), IssueOptions::access_only())?;

        Ok(AuthTokens {
            access_token: pair.access_token,
            refresh_token: refresh_token.to_string(),
        })
    }

    async fn link_external_identity(&self, access_token: &str) -> Result<AuthTokens, AuthError> {
        let profile = self
            .identity_provider
            .fetch_profile(access_token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch external profile");
                AuthError::from(e)
            })?;

        tracing::debug!(
            email = %profile.email,
            subject = %profile.subject,
            "External profile fetched"
        );

        let user = match self.find_user_by_email(&profile.email).await {
            Ok(user) => user,
            Err(UserError::NotFoundByEmail(_)) => self.create_oauth_user(&profile).await?,
            Err(e) => {
                tracing::error!(error = %e, "Failed to look up external identity user");
                return Err(AuthError::Internal(e.to_string()));
            }
        };

        self.issue_session(&user)
    }

    async fn logout(&self, user_id: &UserId) {
        tracing::info!(user_id = %user_id, "User logged out");
    }
}
