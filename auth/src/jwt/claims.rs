use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity claims carried by access and refresh tokens.
///
/// Both token kinds share this shape; they differ only in `exp`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (local user identifier)
    pub sub: String,

    /// Email address of the subject
    pub email: String,

    /// Display name ("first last")
    pub name: String,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create identity claims without timing information.
    ///
    /// The token service stamps `iat` and `exp` at issuance.
    pub fn for_user(
        user_id: impl ToString,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            email: email.into(),
            name: name.into(),
            iat: None,
            exp: None,
        }
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Stamp `iat = now` and `exp = now + lifetime`.
    pub fn valid_for(self, now: DateTime<Utc>, lifetime: Duration) -> Self {
        self.with_issued_at(now.timestamp())
            .with_expiration((now + lifetime).timestamp())
    }

    /// Check if token is expired.
    ///
    /// A token stays valid up to and including its `exp` second. Claims
    /// without `exp` never reach this check because decoding requires it.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| exp < current_timestamp)
    }
}
