use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use crate::domain::error::DomainError;

/// Lookup of a GitHub user's public repositories.
#[async_trait]
pub(crate) trait GithubClient: Send + Sync {
    /// Upstream JSON as-is, or `None` when GitHub does not answer 200.
    async fn user_repos(&self, username: &str) -> Result<Option<serde_json::Value>, DomainError>;
}

#[derive(Debug, Clone)]
pub(crate) struct HttpGithubClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpGithubClient {
    const REPOS_PER_PAGE: &'static str = "5";

    pub(crate) fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("devconnect-server/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(5))
            .timeout(timeout)
            .build()
            .context("failed to build GitHub http client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token,
        })
    }

    fn repos_url(&self, username: &str) -> String {
        format!(
            "{}/users/{}/repos",
            self.base_url.trim_end_matches('/'),
            username
        )
    }
}

#[async_trait]
impl GithubClient for HttpGithubClient {
    async fn user_repos(&self, username: &str) -> Result<Option<serde_json::Value>, DomainError> {
        let mut request = self
            .client
            .get(self.repos_url(username))
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .query(&[
                ("per_page", Self::REPOS_PER_PAGE),
                ("sort", "created"),
                ("direction", "asc"),
            ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|err| DomainError::Unexpected(format!("github request failed: {err}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(%status, username, "github repos lookup did not succeed");
            return Ok(None);
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|err| DomainError::Unexpected(format!("github body is not json: {err}")))?;
        debug!(username, "github repos fetched");
        Ok(Some(body))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::HttpGithubClient;

    #[test]
    fn repos_url_joins_base_and_username() {
        let client = HttpGithubClient::new("https://api.github.com/", None, Duration::from_secs(1))
            .expect("client must build");
        assert_eq!(
            client.repos_url("octocat"),
            "https://api.github.com/users/octocat/repos"
        );
    }
}
