//! Repository listing: the GitHub REST client, its Redis-backed cache, and the
//! `RepoSource` seam the projects service depends on.

pub mod cache;
pub mod client;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::repository::Repository;

pub use cache::CachedRepoSource;
pub use client::GitHubClient;

/// Number of repositories requested per listing, most recently updated first.
pub const PAGE_SIZE: u32 = 50;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("'{0}' is not a valid GitHub username")]
    InvalidUsername(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Listing for '{username}' failed with status {status}")]
    Status { username: String, status: u16 },
}

/// Carried in `AppState` as `Arc<dyn RepoSource>`.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Lists up to `PAGE_SIZE` public repositories for `username`.
    async fn list_repos(&self, username: &str) -> Result<Vec<Repository>, GitHubError>;
}

/// GitHub login rules: 1-39 ASCII alphanumerics or hyphens, no leading or
/// trailing hyphen, no consecutive hyphens.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= 39
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !username.starts_with('-')
        && !username.ends_with('-')
        && !username.contains("--")
}
