use std::sync::Arc;

use crate::config::Config;
use crate::github::RepoSource;
use crate::llm_client::GenerativeBackend;
use crate::store::PreferenceStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Visitor preferences: username, selection, overrides, avatar.
    pub prefs: Arc<dyn PreferenceStore>,
    /// Repository listing. Production wraps the GitHub client in a Redis cache.
    pub repos: Arc<dyn RepoSource>,
    pub llm: Arc<dyn GenerativeBackend>,
    pub config: Config,
}
