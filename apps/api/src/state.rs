use std::sync::Arc;

use crate::config::Mailbox;
use crate::mailer::EmailSender;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable delivery backend. Default: ResendClient.
    pub mailer: Arc<dyn EmailSender>,
    pub mailbox: Mailbox,
}
