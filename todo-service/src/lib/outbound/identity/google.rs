use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::auth::errors::IdentityProviderError;
use crate::domain::auth::models::ExternalProfile;
use crate::domain::auth::ports::IdentityProvider;

/// Google OAuth2 userinfo client.
///
/// Resolves a Google access token to the profile of the account that owns it.
pub struct GoogleIdentityProvider {
    client: reqwest::Client,
    userinfo_url: String,
}

impl GoogleIdentityProvider {
    pub fn new(
        userinfo_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, IdentityProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdentityProviderError::RequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            userinfo_url: userinfo_url.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    name: String,
    picture: Option<String>,
}

impl TryFrom<UserInfo> for ExternalProfile {
    type Error = IdentityProviderError;

    fn try_from(info: UserInfo) -> Result<Self, Self::Error> {
        if info.email.trim().is_empty() {
            return Err(IdentityProviderError::InvalidProfile(
                "userinfo response has no email".to_string(),
            ));
        }

        Ok(ExternalProfile {
            subject: info.sub,
            email: info.email,
            name: info.name,
            picture: info.picture.filter(|p| !p.is_empty()),
        })
    }
}

fn transport_error(e: reqwest::Error) -> IdentityProviderError {
    if e.is_timeout() {
        IdentityProviderError::Timeout
    } else {
        IdentityProviderError::RequestFailed(e.to_string())
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    async fn fetch_profile(
        &self,
        access_token: &str,
    ) -> Result<ExternalProfile, IdentityProviderError> {
        let response = self
            .client
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Userinfo request rejected");
            return Err(IdentityProviderError::Rejected(status.as_u16()));
        }

        let info: UserInfo = response.json().await.map_err(|e| {
            if e.is_timeout() {
                IdentityProviderError::Timeout
            } else {
                IdentityProviderError::InvalidProfile(e.to_string())
            }
        })?;

        ExternalProfile::try_from(info)
    }
}
