//! `data:<mime>;base64,<payload>` helpers for uploaded and generated images.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUriError {
    #[error("expected a data URI of the form 'data:<mimetype>;base64,<data>'")]
    Malformed,

    #[error("unsupported media type '{0}', expected an image")]
    NotAnImage(String),

    #[error("payload is not valid base64")]
    InvalidBase64,

    #[error("payload is empty")]
    Empty,
}

/// An inline image: MIME type plus base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    /// Base64 (standard alphabet) encoded bytes.
    pub data: String,
}

impl DataUri {
    /// Encodes raw image bytes. Rejects empty payloads and non-image types.
    pub fn from_image_bytes(mime_type: &str, bytes: &[u8]) -> Result<Self, DataUriError> {
        let mime_type = normalize_image_mime(mime_type)?;
        if bytes.is_empty() {
            return Err(DataUriError::Empty);
        }
        Ok(Self {
            mime_type,
            data: BASE64.encode(bytes),
        })
    }

    /// Parses and validates an image data URI.
    pub fn parse_image(uri: &str) -> Result<Self, DataUriError> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUriError::Malformed)?;
        let (meta, payload) = rest.split_once(',').ok_or(DataUriError::Malformed)?;
        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or(DataUriError::Malformed)?;
        let mime_type = normalize_image_mime(mime_type)?;

        if payload.is_empty() {
            return Err(DataUriError::Empty);
        }
        BASE64
            .decode(payload)
            .map_err(|_| DataUriError::InvalidBase64)?;

        Ok(Self {
            mime_type,
            data: payload.to_string(),
        })
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

fn normalize_image_mime(mime_type: &str) -> Result<String, DataUriError> {
    let mime_type = mime_type.trim().to_ascii_lowercase();
    match mime_type.split_once('/') {
        Some(("image", subtype)) if !subtype.is_empty() => Ok(mime_type),
        _ => Err(DataUriError::NotAnImage(mime_type)),
    }
}
