//! Axum route handler for the contact form.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::contact::validation::{validate_contact, ContactMessage};
use crate::errors::AppError;
use crate::state::AppState;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";

#[derive(Debug, Serialize)]
pub struct ContactAck {
    pub success: &'static str,
    pub message_id: Uuid,
    pub received_at: DateTime<Utc>,
}

/// POST /api/v1/contact
///
/// Re-validates the form server side and logs the message. No mail is sent.
pub async fn handle_contact(
    State(state): State<AppState>,
    Json(msg): Json<ContactMessage>,
) -> Result<Json<ContactAck>, AppError> {
    validate_contact(&msg).map_err(AppError::InvalidFields)?;

    let message_id = Uuid::new_v4();
    info!(
        %message_id,
        name = %msg.name,
        email = %msg.email,
        recipient = state.config.contact_recipient.as_deref().unwrap_or("(unset)"),
        "New contact message: {}",
        msg.message
    );

    Ok(Json(ContactAck {
        success: SUCCESS_MESSAGE,
        message_id,
        received_at: Utc::now(),
    }))
}
