//! Application configuration module
//!
//! Configuration is read once at process start, from the environment (after
//! loading an optional `.env` file), and then handed to the server by value.
//! Nothing here is global.

use std::fmt;
use thiserror::Error;

/// Default listen port
pub const DEFAULT_PORT: u16 = 4900;

/// Default listen host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default base URL of the GitHub REST API
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Application configuration
#[derive(Clone)]
pub struct AppConfig {
    /// Secret used to sign and verify bearer tokens
    pub jwt_secret: String,
    /// PostgreSQL connection string; `None` selects the in-memory store
    pub database_url: Option<String>,
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
    /// OAuth app client id sent to GitHub
    pub github_client_id: Option<String>,
    /// OAuth app secret sent to GitHub
    pub github_secret: Option<String>,
    /// Base URL of the GitHub REST API
    pub github_api_url: String,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// Reads `JWT_SECRET` (required), `DATABASE_URL`, `HOST`, `PORT`,
    /// `GITHUB_CLIENT_ID`, `GITHUB_SECRET` and `GITHUB_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Ok(secret) = std::env::var("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Ok(host) = std::env::var("HOST") {
            builder = builder.host(host);
        }
        if let Ok(port) = std::env::var("PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("PORT", port))?;
            builder = builder.port(port);
        }
        if let Ok(id) = std::env::var("GITHUB_CLIENT_ID") {
            builder = builder.github_client_id(id);
        }
        if let Ok(secret) = std::env::var("GITHUB_SECRET") {
            builder = builder.github_secret(secret);
        }
        if let Ok(url) = std::env::var("GITHUB_API_URL") {
            builder = builder.github_api_url(url);
        }

        builder.build()
    }

    /// Address the HTTP listener binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// GitHub credentials, only when both halves are configured
    pub fn github_credentials(&self) -> Option<(&str, &str)> {
        match (&self.github_client_id, &self.github_secret) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("github_client_id", &self.github_client_id)
            .field("github_secret", &self.github_secret.as_ref().map(|_| "<redacted>"))
            .field("github_api_url", &self.github_api_url)
            .finish()
    }
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    jwt_secret: Option<String>,
    database_url: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    github_client_id: Option<String>,
    github_secret: Option<String>,
    github_api_url: Option<String>,
}

impl AppConfigBuilder {
    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    /// Set the database connection string
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listen host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the listen port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the GitHub OAuth client id
    pub fn github_client_id(mut self, id: impl Into<String>) -> Self {
        self.github_client_id = Some(id.into());
        self
    }

    /// Set the GitHub OAuth secret
    pub fn github_secret(mut self, secret: impl Into<String>) -> Self {
        self.github_secret = Some(secret.into());
        self
    }

    /// Set the GitHub API base URL
    pub fn github_api_url(mut self, url: impl Into<String>) -> Self {
        self.github_api_url = Some(url.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let jwt_secret = self
            .jwt_secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingValue("JWT_SECRET"))?;

        let github_api_url = self
            .github_api_url
            .unwrap_or_else(|| DEFAULT_GITHUB_API_URL.to_string());
        if !github_api_url.starts_with("http://") && !github_api_url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(github_api_url));
        }

        Ok(AppConfig {
            jwt_secret,
            database_url: self.database_url.filter(|s| !s.is_empty()),
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            github_client_id: self.github_client_id,
            github_secret: self.github_secret,
            github_api_url: github_api_url.trim_end_matches('/').to_string(),
        })
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
