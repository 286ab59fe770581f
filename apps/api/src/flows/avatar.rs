//! Avatar synthesis from a text description and an optional reference photo.

use tracing::{info, warn};

use crate::datauri::DataUri;
use crate::errors::AppError;
use crate::flows::prompts::{AVATAR_PROMPT_TEMPLATE, AVATAR_REFERENCE_INSTRUCTION};
use crate::llm_client::{GenerativeBackend, PromptPart};

pub const MISSING_DESCRIPTION_MESSAGE: &str = "Please enter a description for your avatar.";
pub const GENERATION_FAILED_MESSAGE: &str =
    "There was a problem generating your avatar. Please try again.";

/// Builds the multimodal prompt. The reference photo, when present, follows
/// the instruction that explains how to use it.
pub fn build_avatar_prompt(description: &str, reference: Option<DataUri>) -> Vec<PromptPart> {
    let mut parts = vec![PromptPart::Text(
        AVATAR_PROMPT_TEMPLATE.replace("{description}", description.trim()),
    )];

    if let Some(photo) = reference {
        parts.push(PromptPart::Text(AVATAR_REFERENCE_INSTRUCTION.to_string()));
        parts.push(PromptPart::Media(photo));
    }

    parts
}

/// Validates the inputs and asks the backend for an avatar image.
pub async fn generate_avatar(
    backend: &dyn GenerativeBackend,
    description: &str,
    reference_photo: Option<&str>,
) -> Result<DataUri, AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation(MISSING_DESCRIPTION_MESSAGE.to_string()));
    }

    let reference = reference_photo
        .filter(|uri| !uri.trim().is_empty())
        .map(DataUri::parse_image)
        .transpose()
        .map_err(|e| AppError::Validation(format!("Reference photo is invalid: {e}")))?;

    let with_reference = reference.is_some();
    let parts = build_avatar_prompt(description, reference);

    match backend.generate_image(parts).await {
        Ok(image) => {
            info!(
                "Generated avatar ({}, reference photo: {with_reference})",
                image.mime_type
            );
            Ok(image)
        }
        Err(e) => {
            warn!("Avatar generation failed: {e}");
            Err(AppError::Generation(GENERATION_FAILED_MESSAGE.to_string()))
        }
    }
}
