//! GitHub Repository Proxy
//!
//! Fetches the five most recently created public repositories of a GitHub
//! user and hands the listing back untouched. OAuth app credentials, when
//! configured, are sent as basic auth to lift the anonymous rate limit.

use reqwest::{header::USER_AGENT, Client, StatusCode};

use crate::backend::error::BackendError;
use crate::shared::AppConfig;

pub const NO_GITHUB_PROFILE: &str = "No Github profile found";

const CLIENT_USER_AGENT: &str = concat!("devconnect/", env!("CARGO_PKG_VERSION"));

/// GitHub API client
#[derive(Clone, Debug)]
pub struct GithubClient {
    http: Client,
    api_url: String,
    credentials: Option<(String, String)>,
}

impl GithubClient {
    pub fn new(api_url: impl Into<String>, credentials: Option<(String, String)>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            credentials,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let credentials = config
            .github_credentials()
            .map(|(id, secret)| (id.to_string(), secret.to_string()));
        Self::new(config.github_api_url.clone(), credentials)
    }

    /// Latest repositories of `username`
    ///
    /// Anything other than a 200 with a JSON body, including a transport
    /// failure, is reported as `Upstream("No Github profile found")`.
    pub async fn latest_repos(&self, username: &str) -> Result<serde_json::Value, BackendError> {
        if !is_valid_username(username) {
            tracing::warn!("Rejected GitHub username: {:?}", username);
            return Err(BackendError::upstream(NO_GITHUB_PROFILE));
        }

        let url = format!("{}/users/{}/repos", self.api_url, username);
        let mut request = self
            .http
            .get(&url)
            .query(&[("per_page", "5"), ("sort", "created:asc")])
            .header(USER_AGENT, CLIENT_USER_AGENT);

        if let Some((id, secret)) = &self.credentials {
            request = request.basic_auth(id, Some(secret));
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!("GitHub request failed: {:?}", e);
            BackendError::upstream(NO_GITHUB_PROFILE)
        })?;

        if response.status() != StatusCode::OK {
            tracing::warn!("GitHub answered {} for {}", response.status(), username);
            return Err(BackendError::upstream(NO_GITHUB_PROFILE));
        }

        response.json::<serde_json::Value>().await.map_err(|e| {
            tracing::error!("GitHub returned an unreadable body: {:?}", e);
            BackendError::upstream(NO_GITHUB_PROFILE)
        })
    }
}

/// GitHub logins: alphanumerics and single inner hyphens, at most 39 chars
fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
        && username.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
