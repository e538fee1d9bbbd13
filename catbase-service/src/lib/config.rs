use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Minimum HS256 secret length accepted at startup.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    pub cookies: CookieConfig,
    pub cors: CorsConfig,
}

/// PostgreSQL connection and pool limits.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub acquire_timeout_secs: u64,
}

impl DatabaseConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

impl JwtConfig {
    pub fn token_policy(&self) -> auth::TokenPolicy {
        auth::TokenPolicy {
            issuer: self.issuer.clone(),
            access_ttl: chrono::Duration::minutes(self.access_ttl_minutes),
            refresh_ttl: chrono::Duration::days(self.refresh_ttl_days),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Issue a new refresh token on every refresh and revoke the old one.
    #[serde(default)]
    pub rotate_refresh_tokens: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CookieConfig {
    pub secure: bool,
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("jwt.secret must be at least {min} bytes, got {actual}")]
    JwtSecretTooShort { min: usize, actual: usize },

    #[error("token lifetimes must be positive")]
    NonPositiveTokenLifetime,

    #[error("database.max_connections must be at least database.min_connections")]
    PoolBounds,
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        configuration.try_deserialize()
    }

    /// Reject configurations the service must not start with.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let secret_len = self.jwt.secret.as_bytes().len();
        if secret_len < MIN_JWT_SECRET_BYTES {
            return Err(ConfigValidationError::JwtSecretTooShort {
                min: MIN_JWT_SECRET_BYTES,
                actual: secret_len,
            });
        }
        if self.jwt.access_ttl_minutes <= 0 || self.jwt.refresh_ttl_days <= 0 {
            return Err(ConfigValidationError::NonPositiveTokenLifetime);
        }
        if self.database.max_connections < self.database.min_connections {
            return Err(ConfigValidationError::PoolBounds);
        }
        Ok(())
    }
}
