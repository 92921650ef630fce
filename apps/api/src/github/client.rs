//! Thin client for the GitHub REST API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;

const GITHUB_API_URL: &str = "https://api.github.com";
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);
/// Only the most recently updated repos are scanned.
const REPOS_PER_PAGE: u32 = 10;

/// The subset of repository fields the skill scanner reads.
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            // GitHub rejects requests without a User-Agent.
            client: Client::builder()
                .user_agent(concat!("codeforge-api/", env!("CARGO_PKG_VERSION")))
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            token,
        }
    }

    /// Fetches the user's 10 most recently updated public repositories.
    /// Any non-200 reply — unknown user, rate limit — is reported the same
    /// way, as the original API does not distinguish them.
    pub async fn recent_repos(&self, username: &str) -> Result<Vec<GithubRepo>, AppError> {
        let url = format!(
            "{GITHUB_API_URL}/users/{username}/repos?sort=updated&per_page={REPOS_PER_PAGE}"
        );

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            warn!("GitHub API unreachable: {e}");
            AppError::Upstream(format!("GitHub API unreachable: {e}"))
        })?;

        if !response.status().is_success() {
            return Err(AppError::NotFound(
                "User not found or API limit reached".to_string(),
            ));
        }

        response
            .json::<Vec<GithubRepo>>()
            .await
            .map_err(|e| AppError::Upstream(format!("Malformed GitHub API reply: {e}")))
    }
}
