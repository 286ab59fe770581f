use std::collections::{BTreeMap, BTreeSet};

pub const AVATAR_PLACEHOLDER_URL: &str = "https://placehold.co/128x128.png";

/// Keys of the durable preference store. Each key holds one independently
/// serialized JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    GithubUsername,
    SelectedRepoIds,
    ProjectImages,
    ProjectDescriptions,
    /// Ids returned by the last successful listing fetch.
    FetchedRepoIds,
    Avatar,
}

impl PreferenceKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::GithubUsername => "githubUsername",
            PreferenceKey::SelectedRepoIds => "selectedRepoIds",
            PreferenceKey::ProjectImages => "projectImages",
            PreferenceKey::ProjectDescriptions => "projectDescriptions",
            PreferenceKey::FetchedRepoIds => "fetchedRepoIds",
            PreferenceKey::Avatar => "avatarUrl",
        }
    }
}

impl std::fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the projects gallery persists between visits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPreferences {
    pub github_username: String,
    pub selected_repo_ids: BTreeSet<u64>,
    /// repo id → image data URI
    pub project_images: BTreeMap<u64, String>,
    /// repo id → description override
    pub project_descriptions: BTreeMap<u64, String>,
    pub fetched_repo_ids: BTreeSet<u64>,
}
