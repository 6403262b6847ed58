use std::any::Any;

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contact_schema::{ContactResponse, ValidationErrors, MSG_DELIVERY_FAILED, MSG_INTERNAL};
use thiserror::Error;

use crate::mailer::MailerError;

/// Application-level error type.
/// Implements `IntoResponse` so every failure leaves the handler as a
/// `ContactResponse` body; provider and internal details are only logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Unreadable request body: {0}")]
    UnreadableBody(#[from] BytesRejection),

    #[error("Email delivery error: {0}")]
    Delivery(#[from] MailerError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(errors) => {
                tracing::debug!("Rejected contact form: {errors}");
                (
                    StatusCode::BAD_REQUEST,
                    ContactResponse::invalid(errors.into_inner()),
                )
            }
            AppError::MalformedBody(e) => {
                tracing::error!("Malformed contact request body: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ContactResponse::failure(MSG_INTERNAL),
                )
            }
            AppError::UnreadableBody(e) => {
                tracing::error!("Failed to read contact request body: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ContactResponse::failure(MSG_INTERNAL),
                )
            }
            AppError::Delivery(e) => {
                tracing::error!("Email provider error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ContactResponse::failure(MSG_DELIVERY_FAILED),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ContactResponse::failure(MSG_INTERNAL),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Response for a handler that panicked. Installed with `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
