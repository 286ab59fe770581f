use serde::Serialize;

use crate::models::preferences::ProjectPreferences;
use crate::models::repository::Repository;

pub const PROJECT_IMAGE_PLACEHOLDER: &str =
    "https://placehold.co/600x400/3F51B5/FFFFFF?text=GG&font=spacgrotesk";
pub const NO_DESCRIPTION: &str = "No description available.";

/// What the gallery shows for one selected repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectCard {
    pub id: u64,
    pub name: String,
    pub language: Option<String>,
    pub description: String,
    pub image_url: String,
    pub html_url: String,
    pub homepage: Option<String>,
}

/// Selected repositories in listing order, with overrides applied.
pub fn build_gallery(repos: &[Repository], prefs: &ProjectPreferences) -> Vec<ProjectCard> {
    repos
        .iter()
        .filter(|repo| prefs.selected_repo_ids.contains(&repo.id))
        .map(|repo| ProjectCard {
            id: repo.id,
            name: repo.name.clone(),
            language: non_empty(repo.language.as_deref()).map(str::to_string),
            description: non_empty(prefs.project_descriptions.get(&repo.id).map(String::as_str))
                .or_else(|| non_empty(repo.description.as_deref()))
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            image_url: non_empty(prefs.project_images.get(&repo.id).map(String::as_str))
                .unwrap_or(PROJECT_IMAGE_PLACEHOLDER)
                .to_string(),
            html_url: repo.html_url.clone(),
            homepage: non_empty(repo.homepage.as_deref()).map(str::to_string),
        })
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
