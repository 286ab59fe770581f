use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, info};

use crate::github::{is_valid_username, GitHubError, RepoSource, PAGE_SIZE};
use crate::models::repository::Repository;

const USER_AGENT: &str = concat!("devfolio/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Thin client over `GET /users/{username}/repos`. Each call is a single
/// request; failures are returned to the caller as-is.
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self, GitHubError> {
        Ok(Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn listing_url(&self, username: &str) -> String {
        format!("{}/users/{}/repos", self.api_url, username)
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>, GitHubError> {
        if !is_valid_username(username) {
            return Err(GitHubError::InvalidUsername(username.to_string()));
        }

        let per_page = PAGE_SIZE.to_string();
        let mut request = self
            .client
            .get(self.listing_url(username))
            .query(&[("sort", "updated"), ("per_page", per_page.as_str())])
            .header(header::ACCEPT, "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            debug!("GitHub listing for {username} returned {status}");
            return Err(GitHubError::Status {
                username: username.to_string(),
                status: status.as_u16(),
            });
        }

        let repos: Vec<Repository> = response.json().await?;
        info!("Fetched {} repositories for {username}", repos.len());
        Ok(repos)
    }
}
