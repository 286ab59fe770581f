//! Axum route handlers for the avatar.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::avatar::service;
use crate::errors::AppError;
use crate::models::notice::Notice;
use crate::state::AppState;
use crate::upload::read_image_upload;

#[derive(Debug, Deserialize)]
pub struct GenerateAvatarRequest {
    pub description: String,
    /// Optional reference photo as `data:<mime>;base64,<data>`.
    #[serde(default)]
    pub photo_data_uri: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub avatar_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

/// GET /api/v1/avatar
pub async fn handle_get_avatar(
    State(state): State<AppState>,
) -> Result<Json<AvatarResponse>, AppError> {
    let avatar_url = service::current_avatar(state.prefs.as_ref()).await?;
    Ok(Json(AvatarResponse {
        avatar_url,
        notice: None,
    }))
}

/// PUT /api/v1/avatar  (multipart, field `file`)
pub async fn handle_upload_avatar(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AvatarResponse>, AppError> {
    let image = read_image_upload(multipart).await?;
    let avatar_url = service::set_avatar(state.prefs.as_ref(), &image).await?;
    Ok(Json(AvatarResponse {
        avatar_url,
        notice: Some(Notice::success("Avatar updated", "Your new avatar has been saved.")),
    }))
}

/// POST /api/v1/avatar/generate
pub async fn handle_generate_avatar(
    State(state): State<AppState>,
    Json(request): Json<GenerateAvatarRequest>,
) -> Result<Json<AvatarResponse>, AppError> {
    let avatar_url = service::generate_and_store_avatar(
        state.prefs.as_ref(),
        state.llm.as_ref(),
        &request.description,
        request.photo_data_uri.as_deref(),
    )
    .await?;
    Ok(Json(AvatarResponse {
        avatar_url,
        notice: Some(Notice::success(
            "Success!",
            "Your new avatar has been generated.",
        )),
    }))
}

/// DELETE /api/v1/avatar
pub async fn handle_reset_avatar(
    State(state): State<AppState>,
) -> Result<Json<AvatarResponse>, AppError> {
    let avatar_url = service::reset_avatar(state.prefs.as_ref()).await?;
    Ok(Json(AvatarResponse {
        avatar_url,
        notice: None,
    }))
}
