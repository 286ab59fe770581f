use axum::extract::Multipart;
use bytes::Bytes;

use crate::datauri::DataUri;
use crate::errors::AppError;

/// Request-body cap for image upload routes.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

const FILE_FIELD: &str = "file";

/// Reads the `file` field of a multipart upload into an image data URI.
/// Other fields are skipped.
pub async fn read_image_upload(mut multipart: Multipart) -> Result<DataUri, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "Upload exceeds {} MiB",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }

        return DataUri::from_image_bytes(&mime_type, &data)
            .map_err(|e| AppError::Validation(format!("Upload rejected: {e}")));
    }

    Err(AppError::Validation(format!(
        "Upload must include a '{FILE_FIELD}' field"
    )))
}
