use crate::domain::user::models::required;
use crate::domain::user::models::UserProfile;
use crate::user::errors::ValidationError;

/// Command to register a local user from raw request fields.
///
/// The plaintext password lives only inside this command and is dropped once
/// hashed.
#[derive(Clone)]
pub struct RegisterUserCommand {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl RegisterUserCommand {
    /// Structural validation: required fields and email syntax, in field
    /// declaration order (email, first_name, last_name, password).
    ///
    /// # Returns
    /// Validated profile and the still-unchecked plaintext password
    pub fn into_parts(self) -> Result<(UserProfile, String), ValidationError> {
        let profile = UserProfile::new(self.email, self.first_name, self.last_name)?;
        let password = required("password", self.password)?;
        Ok((profile, password))
    }
}

impl std::fmt::Debug for RegisterUserCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterUserCommand")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish_non_exhaustive()
    }
}

/// Command to log in with email and password
#[derive(Clone)]
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

/// Profile returned by the third-party identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalProfile {
    /// Provider-assigned account id
    pub subject: String,
    pub email: String,
    pub name: String,
    pub picture: Option<String>,
}

/// Access/refresh token pair handed to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}
