use std::env;
use std::time::Duration;

use auth::tokens::ACCESS_TOKEN_LIFETIME_MINUTES;
use auth::tokens::REFRESH_TOKEN_LIFETIME_HOURS;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IdentityConfig {
    pub google_userinfo_url: String,
    pub request_timeout_secs: u64,
}

impl JwtConfig {
    pub fn access_lifetime(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_minutes)
    }

    pub fn refresh_lifetime(&self) -> chrono::Duration {
        chrono::Duration::hours(self.refresh_token_hours)
    }
}

impl IdentityConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(environment())
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.max_connections", 5)?
            .set_default("jwt.access_token_minutes", ACCESS_TOKEN_LIFETIME_MINUTES)?
            .set_default("jwt.refresh_token_hours", REFRESH_TOKEN_LIFETIME_HOURS)?
            .set_default(
                "identity.google_userinfo_url",
                "https://www.googleapis.com/oauth2/v3/userinfo",
            )?
            .set_default("identity.request_timeout_secs", 120)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment)
            .build()?;

        configuration.try_deserialize()
    }
}

/// Unprefixed `__`-separated variables, e.g. DATABASE__URL overrides database.url.
fn environment() -> Environment {
    Environment::default().separator("__").try_parsing(true)
}
