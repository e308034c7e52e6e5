use std::fmt;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::ValidationError;

/// User aggregate entity.
///
/// `password_hash` never leaves the service; OAuth-created users carry an
/// empty hash, which no password verifies against.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
    pub picture_url: Option<String>,
    pub password_hash: String,
    pub oauth_user: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display name used in token claims and API responses.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Store-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from its decimal string form (as carried in token subjects).
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a decimal integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        s.parse::<i64>()
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `ValidationError` - Email is empty ("required") or malformed
    pub fn new(email: String) -> Result<Self, ValidationError> {
        if email.trim().is_empty() {
            return Err(ValidationError::required("email"));
        }

        let options = email_address::Options::default().without_display_text();
        email_address::EmailAddress::parse_with_options(&email, options)
            .map(|_| EmailAddress(email))
            .map_err(|_| ValidationError::invalid_email())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated identity fields shared by local and OAuth registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub email: EmailAddress,
    pub first_name: String,
    pub last_name: String,
}

impl UserProfile {
    /// Validate profile fields in declaration order, stopping at the first failure.
    pub fn new(
        email: String,
        first_name: String,
        last_name: String,
    ) -> Result<Self, ValidationError> {
        let email = EmailAddress::new(email)?;
        let first_name = required("first_name", first_name)?;
        let last_name = required("last_name", last_name)?;

        Ok(Self {
            email,
            first_name,
            last_name,
        })
    }
}

pub(crate) fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::required(field))
    } else {
        Ok(value)
    }
}

/// Plaintext password that satisfies the local strength rules.
///
/// Lives only as long as the registration command; `Debug` never prints it.
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// Check length first, then character classes.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooWeak` - Missing an ASCII uppercase letter, lowercase letter or digit
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
        let has_digit = password.chars().any(|c| c.is_ascii_digit());

        if has_upper && has_lower && has_digit {
            Ok(Self(password))
        } else {
            Err(PasswordPolicyError::TooWeak)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// User row to be inserted; the store assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub profile: UserProfile,
    pub picture_url: Option<String>,
    pub password_hash: String,
    pub oauth_user: bool,
}

impl NewUser {
    /// Locally registered user with a hashed password.
    pub fn local(profile: UserProfile, password_hash: String) -> Self {
        Self {
            profile,
            picture_url: None,
            password_hash,
            oauth_user: false,
        }
    }

    /// User created from a third-party identity; has no usable password.
    pub fn oauth(profile: UserProfile, picture_url: Option<String>) -> Self {
        Self {
            profile,
            picture_url,
            password_hash: String::new(),
            oauth_user: true,
        }
    }
}

/// Split a provider display name into first and last name.
///
/// Takes the first and the last whitespace-delimited tokens; middle tokens are
/// dropped, and a single-token name yields that token for both parts.
pub fn split_display_name(name: &str) -> (String, String) {
    let mut tokens = name.split_whitespace();
    let first = tokens.next().unwrap_or_default();
    let last = tokens.last().unwrap_or(first);

    (first.to_string(), last.to_string())
}
