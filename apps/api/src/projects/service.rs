//! Projects gallery operations over the preference store and a `RepoSource`.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::datauri::DataUri;
use crate::errors::AppError;
use crate::github::RepoSource;
use crate::models::notice::Notice;
use crate::models::preferences::{PreferenceKey, ProjectPreferences};
use crate::models::repository::Repository;
use crate::projects::gallery::{build_gallery, ProjectCard};
use crate::projects::reconcile::reconcile;
use crate::store::{self, load_project_preferences, PreferenceStore};

pub const FETCH_FAILED_TITLE: &str = "Error fetching projects";
pub const FETCH_FAILED_DESCRIPTION: &str =
    "Could not fetch projects from GitHub. Please check the username and try again.";

/// Everything the gallery and the management dialog need after a refresh.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectsView {
    pub github_username: String,
    /// The fetched listing, for the selection checkboxes.
    pub repos: Vec<Repository>,
    pub selected_repo_ids: BTreeSet<u64>,
    pub project_images: BTreeMap<u64, String>,
    pub project_descriptions: BTreeMap<u64, String>,
    pub gallery: Vec<ProjectCard>,
    pub notice: Option<Notice>,
}

impl ProjectsView {
    fn new(prefs: ProjectPreferences, repos: Vec<Repository>, notice: Option<Notice>) -> Self {
        let gallery = build_gallery(&repos, &prefs);
        Self {
            github_username: prefs.github_username,
            repos,
            selected_repo_ids: prefs.selected_repo_ids,
            project_images: prefs.project_images,
            project_descriptions: prefs.project_descriptions,
            gallery,
            notice,
        }
    }
}

/// Fetches the listing for the stored username and reconciles it.
///
/// Listing failures never escape: they produce an empty view plus a failure
/// notice and leave stored preferences untouched. Only store errors propagate.
pub async fn refresh_projects(
    store: &dyn PreferenceStore,
    source: &dyn RepoSource,
    default_username: &str,
) -> Result<ProjectsView, AppError> {
    let mut prefs = load_project_preferences(store, default_username).await?;

    if prefs.github_username.is_empty() {
        return Ok(ProjectsView::new(prefs, Vec::new(), None));
    }

    let repos = match source.list_repos(&prefs.github_username).await {
        Ok(repos) => repos,
        Err(e) => {
            warn!("Error fetching projects for {}: {e}", prefs.github_username);
            let notice = Notice::failure(FETCH_FAILED_TITLE, FETCH_FAILED_DESCRIPTION);
            return Ok(ProjectsView::new(prefs, Vec::new(), Some(notice)));
        }
    };

    let previous_fetch = prefs.fetched_repo_ids.clone();
    let outcome = reconcile(&mut prefs, &repos);
    if outcome.is_empty() {
        debug!("No new repositories for {}", prefs.github_username);
    }

    if !outcome.newly_selected.is_empty() {
        info!("Auto-selected new repositories: {:?}", outcome.newly_selected);
        store::save(store, PreferenceKey::SelectedRepoIds, &prefs.selected_repo_ids).await?;
    }
    if !outcome.seeded_descriptions.is_empty() {
        store::save(
            store,
            PreferenceKey::ProjectDescriptions,
            &prefs.project_descriptions,
        )
        .await?;
    }
    if prefs.fetched_repo_ids != previous_fetch {
        store::save(store, PreferenceKey::FetchedRepoIds, &prefs.fetched_repo_ids).await?;
    }

    Ok(ProjectsView::new(prefs, repos, None))
}

/// Stores a new username and refreshes against it.
pub async fn set_username(
    store: &dyn PreferenceStore,
    source: &dyn RepoSource,
    default_username: &str,
    username: &str,
) -> Result<ProjectsView, AppError> {
    let username = username.trim();
    store::save(store, PreferenceKey::GithubUsername, &username).await?;
    info!("GitHub username set to '{username}'");
    refresh_projects(store, source, default_username).await
}

async fn load_id_set(
    store: &dyn PreferenceStore,
    key: PreferenceKey,
) -> Result<BTreeSet<u64>, AppError> {
    Ok(store::load(store, key).await?.unwrap_or_default())
}

async fn load_id_map(
    store: &dyn PreferenceStore,
    key: PreferenceKey,
) -> Result<BTreeMap<u64, String>, AppError> {
    Ok(store::load(store, key).await?.unwrap_or_default())
}

fn not_fetched(id: u64) -> AppError {
    AppError::NotFound(format!("Repository {id} is not in the fetched listing"))
}

/// Replaces the selected set. Every id must either be in the last fetch or
/// already be selected.
pub async fn set_selection(
    store: &dyn PreferenceStore,
    repo_ids: &[u64],
) -> Result<BTreeSet<u64>, AppError> {
    let fetched = load_id_set(store, PreferenceKey::FetchedRepoIds).await?;
    let current = load_id_set(store, PreferenceKey::SelectedRepoIds).await?;

    if let Some(&unknown) = repo_ids
        .iter()
        .find(|id| !fetched.contains(id) && !current.contains(id))
    {
        return Err(not_fetched(unknown));
    }

    let selected: BTreeSet<u64> = repo_ids.iter().copied().collect();
    store::save(store, PreferenceKey::SelectedRepoIds, &selected).await?;
    Ok(selected)
}

/// Flips one id in the selected set. Returns whether it is now selected.
pub async fn toggle_selection(
    store: &dyn PreferenceStore,
    repo_id: u64,
) -> Result<(bool, BTreeSet<u64>), AppError> {
    let mut selected = load_id_set(store, PreferenceKey::SelectedRepoIds).await?;

    let now_selected = if selected.remove(&repo_id) {
        false
    } else {
        let fetched = load_id_set(store, PreferenceKey::FetchedRepoIds).await?;
        if !fetched.contains(&repo_id) {
            return Err(not_fetched(repo_id));
        }
        selected.insert(repo_id);
        true
    };

    store::save(store, PreferenceKey::SelectedRepoIds, &selected).await?;
    Ok((now_selected, selected))
}

pub async fn set_project_image(
    store: &dyn PreferenceStore,
    repo_id: u64,
    image: &DataUri,
) -> Result<String, AppError> {
    let mut images = load_id_map(store, PreferenceKey::ProjectImages).await?;
    let uri = image.to_string();
    images.insert(repo_id, uri.clone());
    store::save(store, PreferenceKey::ProjectImages, &images).await?;
    Ok(uri)
}

/// Removing an image that was never set is not an error.
pub async fn remove_project_image(
    store: &dyn PreferenceStore,
    repo_id: u64,
) -> Result<(), AppError> {
    let mut images = load_id_map(store, PreferenceKey::ProjectImages).await?;
    if images.remove(&repo_id).is_some() {
        store::save(store, PreferenceKey::ProjectImages, &images).await?;
    }
    Ok(())
}

/// Stores a manual description override. A blank description removes the
/// override so the card falls back to the remote description.
pub async fn set_project_description(
    store: &dyn PreferenceStore,
    repo_id: u64,
    description: &str,
) -> Result<Option<String>, AppError> {
    let mut descriptions = load_id_map(store, PreferenceKey::ProjectDescriptions).await?;
    let description = description.trim();

    let stored = if description.is_empty() {
        descriptions.remove(&repo_id);
        None
    } else {
        descriptions.insert(repo_id, description.to_string());
        Some(description.to_string())
    };

    store::save(store, PreferenceKey::ProjectDescriptions, &descriptions).await?;
    Ok(stored)
}
