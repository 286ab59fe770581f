//! Axum route handlers for the projects gallery and its management dialog.

use std::collections::BTreeSet;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::flows::project_description::generate_project_description;
use crate::projects::service::{self, ProjectsView};
use crate::state::AppState;
use crate::upload::read_image_upload;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UsernameRequest {
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub repo_ids: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct SelectionResponse {
    pub selected_repo_ids: BTreeSet<u64>,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub repo_id: u64,
    pub selected: bool,
    pub selected_repo_ids: BTreeSet<u64>,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub repo_id: u64,
    pub image_url: String,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionRequest {
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct DescriptionResponse {
    pub repo_id: u64,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateDescriptionRequest {
    pub project_name: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateDescriptionResponse {
    pub description: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/projects
///
/// Fetches and reconciles the listing. Listing failures come back as an
/// empty view with a notice, not as an error status.
pub async fn handle_get_projects(
    State(state): State<AppState>,
) -> Result<Json<ProjectsView>, AppError> {
    let view = service::refresh_projects(
        state.prefs.as_ref(),
        state.repos.as_ref(),
        &state.config.default_github_username,
    )
    .await?;
    Ok(Json(view))
}

/// PUT /api/v1/projects/username
pub async fn handle_set_username(
    State(state): State<AppState>,
    Json(request): Json<UsernameRequest>,
) -> Result<Json<ProjectsView>, AppError> {
    let view = service::set_username(
        state.prefs.as_ref(),
        state.repos.as_ref(),
        &state.config.default_github_username,
        &request.username,
    )
    .await?;
    Ok(Json(view))
}

/// PUT /api/v1/projects/selection
pub async fn handle_set_selection(
    State(state): State<AppState>,
    Json(request): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, AppError> {
    let selected_repo_ids = service::set_selection(state.prefs.as_ref(), &request.repo_ids).await?;
    Ok(Json(SelectionResponse { selected_repo_ids }))
}

/// POST /api/v1/projects/:id/toggle
pub async fn handle_toggle_selection(
    State(state): State<AppState>,
    Path(repo_id): Path<u64>,
) -> Result<Json<ToggleResponse>, AppError> {
    let (selected, selected_repo_ids) =
        service::toggle_selection(state.prefs.as_ref(), repo_id).await?;
    Ok(Json(ToggleResponse {
        repo_id,
        selected,
        selected_repo_ids,
    }))
}

/// PUT /api/v1/projects/:id/image  (multipart, field `file`)
pub async fn handle_upload_project_image(
    State(state): State<AppState>,
    Path(repo_id): Path<u64>,
    multipart: Multipart,
) -> Result<Json<ImageResponse>, AppError> {
    let image = read_image_upload(multipart).await?;
    let image_url = service::set_project_image(state.prefs.as_ref(), repo_id, &image).await?;
    Ok(Json(ImageResponse { repo_id, image_url }))
}

/// DELETE /api/v1/projects/:id/image
pub async fn handle_remove_project_image(
    State(state): State<AppState>,
    Path(repo_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    service::remove_project_image(state.prefs.as_ref(), repo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/projects/:id/description
pub async fn handle_set_description(
    State(state): State<AppState>,
    Path(repo_id): Path<u64>,
    Json(request): Json<DescriptionRequest>,
) -> Result<Json<DescriptionResponse>, AppError> {
    let description =
        service::set_project_description(state.prefs.as_ref(), repo_id, &request.description)
            .await?;
    Ok(Json(DescriptionResponse {
        repo_id,
        description,
    }))
}

/// POST /api/v1/project-descriptions/generate
///
/// Returns generated text to prefill the description field. Nothing is
/// stored; the caller saves it through `PUT /api/v1/projects/:id/description`.
pub async fn handle_generate_description(
    State(state): State<AppState>,
    Json(request): Json<GenerateDescriptionRequest>,
) -> Result<Json<GenerateDescriptionResponse>, AppError> {
    let description = generate_project_description(
        state.llm.as_ref(),
        &request.project_name,
        request.language.as_deref(),
    )
    .await?;
    Ok(Json(GenerateDescriptionResponse { description }))
}
