//! LLM Client: the single point of entry for all generative-backend calls.
//!
//! No other module may call the Gemini API directly; flows go through the
//! `GenerativeBackend` trait so handlers can be exercised without the network.
//!
//! Calls are made once. A failed generation is reported to the visitor, who
//! can simply press the button again.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::datauri::DataUri;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// Model used for text flows.
pub const TEXT_MODEL: &str = "gemini-2.0-flash";
/// Only this model family returns inline images.
pub const IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM response contained no image")]
    NoImage,

    #[error("LLM returned an unusable image: {0}")]
    BadImage(String),
}

/// One piece of a multimodal prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPart {
    Text(String),
    Media(DataUri),
}

/// Carried in `AppState` as `Arc<dyn GenerativeBackend>`.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Returns the concatenated text of the first candidate.
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError>;

    /// Returns the first inline image of the first candidate.
    async fn generate_image(&self, parts: Vec<PromptPart>) -> Result<DataUri, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
    #[serde(skip_serializing_if = "is_empty_slice")]
    safety_settings: &'a [SafetySetting<'a>],
}

fn is_empty_slice<T>(slice: &&[T]) -> bool {
    slice.is_empty()
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum WirePart {
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_modalities: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct SafetySetting<'a> {
    category: &'a str,
    threshold: &'a str,
}

const IMAGE_SAFETY_SETTINGS: &[SafetySetting<'static>] = &[
    SafetySetting {
        category: "HARM_CATEGORY_HATE_SPEECH",
        threshold: "BLOCK_ONLY_HIGH",
    },
    SafetySetting {
        category: "HARM_CATEGORY_DANGEROUS_CONTENT",
        threshold: "BLOCK_NONE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_HARASSMENT",
        threshold: "BLOCK_MEDIUM_AND_ABOVE",
    },
    SafetySetting {
        category: "HARM_CATEGORY_SEXUALLY_EXPLICIT",
        threshold: "BLOCK_LOW_AND_ABOVE",
    },
];

// The image model rejects IMAGE-only requests.
const IMAGE_MODALITIES: &[&str] = &["TEXT", "IMAGE"];

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<WirePart>,
}

impl GenerateContentResponse {
    fn parts(&self) -> &[WirePart] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Joins every text part of the first candidate.
    fn text(&self) -> Option<String> {
        let text: String = self
            .parts()
            .iter()
            .filter_map(|p| match p {
                WirePart::Text { text } => Some(text.as_str()),
                WirePart::Inline { .. } => None,
            })
            .collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }

    /// Returns the first inline image, validated as an image data URI.
    fn image(&self) -> Result<DataUri, LlmError> {
        let inline = self
            .parts()
            .iter()
            .find_map(|p| match p {
                WirePart::Inline { inline_data } => Some(inline_data),
                WirePart::Text { .. } => None,
            })
            .ok_or(LlmError::NoImage)?;

        DataUri::parse_image(&format!(
            "data:{};base64,{}",
            inline.mime_type, inline.data
        ))
        .map_err(|e| LlmError::BadImage(e.to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
        })
    }

    /// Makes a raw `generateContent` call and returns the parsed response.
    async fn call(
        &self,
        model: &str,
        request: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, LlmError> {
        let url = format!("{}/{}:generateContent", self.base_url, model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        debug!(
            "Generation call to {model} succeeded with {} candidate(s)",
            parsed.candidates.len()
        );
        Ok(parsed)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![WirePart::Text {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: None,
            safety_settings: &[],
        };

        self.call(TEXT_MODEL, &request)
            .await?
            .text()
            .ok_or(LlmError::EmptyContent)
    }

    async fn generate_image(&self, parts: Vec<PromptPart>) -> Result<DataUri, LlmError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: parts.into_iter().map(WirePart::from).collect(),
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: IMAGE_MODALITIES,
            }),
            safety_settings: IMAGE_SAFETY_SETTINGS,
        };

        self.call(IMAGE_MODEL, &request).await?.image()
    }
}

impl From<PromptPart> for WirePart {
    fn from(part: PromptPart) -> Self {
        match part {
            PromptPart::Text(text) => WirePart::Text { text },
            PromptPart::Media(uri) => WirePart::Inline {
                inline_data: InlineData {
                    mime_type: uri.mime_type,
                    data: uri.data,
                },
            },
        }
    }
}
