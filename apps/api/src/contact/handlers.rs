//! Axum route handler for the contact form.

use axum::{
    extract::{rejection::BytesRejection, State},
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use contact_schema::{validate_json, ContactResponse};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::contact::email::build_email;
use crate::errors::AppError;
use crate::state::AppState;

/// POST /api/contact
///
/// Validates the body against the shared schema, then hands one email to the
/// configured sender. The body is parsed as JSON whatever its content type;
/// a body that cannot be buffered (e.g. over the size limit) is an internal error.
pub async fn handle_contact(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ContactResponse>, AppError> {
    let submission_id = Uuid::new_v4();

    let body = body?;

    let payload: Value = serde_json::from_slice(&body)?;
    let request = validate_json(&payload).inspect_err(|errors| {
        info!(%submission_id, failures = errors.len(), "Contact submission failed validation");
    })?;

    let email = build_email(&request, &state.mailbox, Utc::now());
    let receipt = state.mailer.send(&email).await?;

    info!(%submission_id, provider_id = %receipt.id, "Contact email sent");

    Ok(Json(ContactResponse::sent()))
}
