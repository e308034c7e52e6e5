use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtHandler;
use crate::jwt::TokenError;

/// Default access token lifetime.
pub const ACCESS_TOKEN_LIFETIME_MINUTES: i64 = 15;

/// Default refresh token lifetime.
pub const REFRESH_TOKEN_LIFETIME_HOURS: i64 = 24;

/// Options controlling what `TokenService::issue` produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueOptions {
    /// Also sign a longer-lived refresh token with the same identity claims
    pub with_refresh: bool,
}

impl IssueOptions {
    pub fn access_only() -> Self {
        Self {
            with_refresh: false,
        }
    }

    pub fn with_refresh() -> Self {
        Self { with_refresh: true }
    }
}

/// Tokens produced by a single issuance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived bearer token
    pub access_token: String,

    /// Long-lived token, present only when requested
    pub refresh_token: Option<String>,
}

/// Issues and verifies stateless access/refresh tokens.
///
/// Tokens are never stored; a token is valid until its embedded expiry.
pub struct TokenService {
    jwt_handler: JwtHandler,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenService {
    /// Create a token service with the default 15 minute / 24 hour lifetimes.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for HS256 signing
    pub fn new(jwt_secret: &[u8]) -> Self {
        Self::with_lifetimes(
            jwt_secret,
            Duration::minutes(ACCESS_TOKEN_LIFETIME_MINUTES),
            Duration::hours(REFRESH_TOKEN_LIFETIME_HOURS),
        )
    }

    /// Create a token service with explicit lifetimes.
    pub fn with_lifetimes(
        jwt_secret: &[u8],
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Self {
        Self {
            jwt_handler: JwtHandler::new(jwt_secret),
            access_lifetime,
            refresh_lifetime,
        }
    }

    /// Issue tokens for the given identity claims, stamped with the current time.
    ///
    /// # Errors
    /// * `SigningFailed` - Token signing failed
    pub fn issue(&self, claims: Claims, options: IssueOptions) -> Result<TokenPair, TokenError> {
        self.issue_at(claims, options, Utc::now())
    }

    /// Issue tokens as if the current time were `now`.
    pub fn issue_at(
        &self,
        claims: Claims,
        options: IssueOptions,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, TokenError> {
        let access_token = self
            .jwt_handler
            .encode(&claims.clone().valid_for(now, self.access_lifetime))?;

        let refresh_token = if options.with_refresh {
            Some(
                self.jwt_handler
                    .encode(&claims.valid_for(now, self.refresh_lifetime))?,
            )
        } else {
            None
        };

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify a token and return its subject.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed, tampered, wrong algorithm or expired
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against the clock value `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        self.jwt_handler
            .decode_at(token, now.timestamp())
            .map(|claims| claims.sub)
    }

    /// Verify a token and return all of its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.jwt_handler.decode_at(token, Utc::now().timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn identity() -> Claims {
        Claims::for_user(42, "ada@example.com", "Ada Lovelace")
    }

    #[test]
    fn test_issue_access_only() {
        let service = TokenService::new(SECRET);

        let pair = service
            .issue(identity(), IssueOptions::access_only())
            .expect("Failed to issue token");

        assert!(!pair.access_token.is_empty());
        assert!(pair.refresh_token.is_none());
        assert_eq!(service.verify(&pair.access_token).unwrap(), "42");
    }

    #[test]
    fn test_issue_with_refresh() {
        let service = TokenService::new(SECRET);

        let pair = service
            .issue(identity(), IssueOptions::with_refresh())
            .expect("Failed to issue tokens");

        let refresh_token = pair.refresh_token.expect("Missing refresh token");
        assert_ne!(pair.access_token, refresh_token);

        let access = service.decode(&pair.access_token).unwrap();
        let refresh = service.decode(&refresh_token).unwrap();
        assert_eq!(access.sub, refresh.sub);
        assert_eq!(access.email, refresh.email);
        assert_eq!(access.name, refresh.name);
        assert_eq!(access.exp.unwrap() - access.iat.unwrap(), 15 * 60);
        assert_eq!(refresh.exp.unwrap() - refresh.iat.unwrap(), 24 * 60 * 60);
    }

    #[test]
    fn test_access_token_expires_after_fifteen_minutes() {
        let service = TokenService::new(SECRET);
        let issued_at = Utc::now();

        let pair = service
            .issue_at(identity(), IssueOptions::access_only(), issued_at)
            .unwrap();

        assert!(service.verify_at(&pair.access_token, issued_at).is_ok());
        assert!(service
            .verify_at(&pair.access_token, issued_at + Duration::minutes(15))
            .is_ok());
        assert_eq!(
            service.verify_at(
                &pair.access_token,
                issued_at + Duration::minutes(15) + Duration::seconds(1)
            ),
            Err(TokenError::InvalidToken)
        );
    }

    #[test]
    fn test_refresh_token_outlives_access_token() {
        let service = TokenService::new(SECRET);
        let issued_at = Utc::now();

        let pair = service
            .issue_at(identity(), IssueOptions::with_refresh(), issued_at)
            .unwrap();
        let refresh_token = pair.refresh_token.unwrap();
        let later = issued_at + Duration::hours(1);

        assert!(service.verify_at(&pair.access_token, later).is_err());
        assert_eq!(service.verify_at(&refresh_token, later).unwrap(), "42");
        assert!(service
            .verify_at(&refresh_token, issued_at + Duration::hours(25))
            .is_err());
    }

    #[test]
    fn test_custom_lifetimes() {
        let service =
            TokenService::with_lifetimes(SECRET, Duration::seconds(30), Duration::minutes(5));
        let issued_at = Utc::now();

        let pair = service
            .issue_at(identity(), IssueOptions::with_refresh(), issued_at)
            .unwrap();

        assert!(service
            .verify_at(&pair.access_token, issued_at + Duration::seconds(31))
            .is_err());
        assert!(service
            .verify_at(
                pair.refresh_token.as_deref().unwrap(),
                issued_at + Duration::minutes(4)
            )
            .is_ok());
    }

    #[test]
    fn test_verify_with_other_secret() {
        let issuer = TokenService::new(SECRET);
        let verifier = TokenService::new(b"another_secret_key_at_least_32_bytes");

        let pair = issuer.issue(identity(), IssueOptions::access_only()).unwrap();

        assert_eq!(
            verifier.verify(&pair.access_token),
            Err(TokenError::InvalidToken)
        );
    }

    #[test]
    fn test_verify_garbage() {
        let service = TokenService::new(SECRET);

        assert_eq!(service.verify(""), Err(TokenError::InvalidToken));
        assert_eq!(
            service.verify("invalid.token.here"),
            Err(TokenError::InvalidToken)
        );
    }
}
