use anyhow::{Context, Result};

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_REPO_CACHE_TTL_SECS: u64 = 3600;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub gemini_api_key: String,
    pub github_api_url: String,
    /// Optional token; unauthenticated listing calls are rate limited to 60/h.
    pub github_token: Option<String>,
    /// Username shown before the owner picks one through the management API.
    pub default_github_username: String,
    /// How long a fetched repository listing stays cached before revalidation.
    pub repo_cache_ttl_secs: u64,
    pub contact_recipient: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            github_api_url: std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string()),
            github_token: optional_env("GITHUB_TOKEN"),
            default_github_username: optional_env("DEFAULT_GITHUB_USERNAME").unwrap_or_default(),
            repo_cache_ttl_secs: match optional_env("REPO_CACHE_TTL_SECS") {
                Some(raw) => raw
                    .parse::<u64>()
                    .context("REPO_CACHE_TTL_SECS must be a number of seconds")?,
                None => DEFAULT_REPO_CACHE_TTL_SECS,
            },
            contact_recipient: optional_env("CONTACT_RECIPIENT"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an env var, treating an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
impl Config {
    /// Configuration used by router tests; nothing here is dialled.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/devfolio_test".to_string(),
            redis_url: "redis://localhost".to_string(),
            gemini_api_key: "test-key".to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_token: None,
            default_github_username: String::new(),
            repo_cache_ttl_secs: DEFAULT_REPO_CACHE_TTL_SECS,
            contact_recipient: Some("owner@example.com".to_string()),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}
