//! One-paragraph project descriptions for the gallery.

use tracing::warn;

use crate::errors::AppError;
use crate::flows::prompts::PROJECT_DESCRIPTION_PROMPT_TEMPLATE;
use crate::llm_client::GenerativeBackend;

pub const GENERATION_FAILED_MESSAGE: &str =
    "Could not generate a description. Please try again or write one yourself.";

pub fn build_description_prompt(project_name: &str, language: Option<&str>) -> String {
    let language_line = match language.map(str::trim).filter(|l| !l.is_empty()) {
        Some(language) => format!("Primary Language: {language}\n"),
        None => String::new(),
    };

    PROJECT_DESCRIPTION_PROMPT_TEMPLATE
        .replace("{project_name}", project_name.trim())
        .replace("{language_line}", &language_line)
}

/// Collapses the model output to a single paragraph: surrounding quotes are
/// dropped and internal line breaks become spaces.
pub fn normalize_paragraph(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('"').trim();
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub async fn generate_project_description(
    backend: &dyn GenerativeBackend,
    project_name: &str,
    language: Option<&str>,
) -> Result<String, AppError> {
    if project_name.trim().is_empty() {
        return Err(AppError::Validation(
            "project_name cannot be empty".to_string(),
        ));
    }

    let prompt = build_description_prompt(project_name, language);
    let raw = backend.generate_text(&prompt).await.map_err(|e| {
        warn!("Description generation for '{project_name}' failed: {e}");
        AppError::Generation(GENERATION_FAILED_MESSAGE.to_string())
    })?;

    let paragraph = normalize_paragraph(&raw);
    if paragraph.is_empty() {
        warn!("Description generation for '{project_name}' returned only whitespace");
        return Err(AppError::Generation(GENERATION_FAILED_MESSAGE.to_string()));
    }
    Ok(paragraph)
}
