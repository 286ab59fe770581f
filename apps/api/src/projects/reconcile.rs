//! Merge-on-fetch of a fresh repository listing into stored preferences.

use crate::models::preferences::ProjectPreferences;
use crate::models::repository::Repository;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Ids absent from the previous fetch, now auto-selected.
    pub newly_selected: Vec<u64>,
    /// Ids whose description override was seeded from the remote description.
    pub seeded_descriptions: Vec<u64>,
}

impl ReconcileOutcome {
    pub fn is_empty(&self) -> bool {
        self.newly_selected.is_empty() && self.seeded_descriptions.is_empty()
    }
}

/// Applies a successful fetch to `prefs`:
///
/// - ids not present in the previous fetch join the selected set;
/// - ids no longer returned stay where they are (nothing is pruned);
/// - remote descriptions seed overrides only where none exists yet;
/// - the previous-fetch record becomes this fetch.
pub fn reconcile(prefs: &mut ProjectPreferences, fetched: &[Repository]) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    for repo in fetched {
        if !prefs.fetched_repo_ids.contains(&repo.id) && prefs.selected_repo_ids.insert(repo.id) {
            outcome.newly_selected.push(repo.id);
        }

        let remote = repo.description.as_deref().unwrap_or_default();
        if !remote.is_empty() && !prefs.project_descriptions.contains_key(&repo.id) {
            prefs
                .project_descriptions
                .insert(repo.id, remote.to_string());
            outcome.seeded_descriptions.push(repo.id);
        }
    }

    prefs.fetched_repo_ids = fetched.iter().map(|r| r.id).collect();
    outcome
}
