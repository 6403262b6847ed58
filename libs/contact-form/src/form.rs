use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use contact_schema::{validate, ContactRequest, Field};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::transport::ContactTransport;

/// How long the success banner stays up before the form returns to idle.
pub const SUCCESS_RESET_DELAY: Duration = Duration::from_secs(5);
pub const NETWORK_ERROR_MESSAGE: &str =
    "Network error. Please check your connection and try again.";
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// What the page renders above the form: the status and its banner text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusView {
    pub status: FormStatus,
    pub banner: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid,
    Sent,
    Failed,
}

/// One contact form instance.
///
/// `submit` takes `&mut self`, so a form never has two submissions in flight.
/// The status lives in a watch channel so the auto-reset task can move it
/// back to idle after a success without borrowing the form.
pub struct ContactForm<T> {
    transport: T,
    values: ContactRequest,
    field_errors: HashMap<Field, String>,
    status: Arc<watch::Sender<StatusView>>,
    reset_task: Option<JoinHandle<()>>,
    reset_delay: Duration,
}

impl<T: ContactTransport> ContactForm<T> {
    pub fn new(transport: T) -> Self {
        let (status, _) = watch::channel(StatusView::default());
        Self {
            transport,
            values: ContactRequest::default(),
            field_errors: HashMap::new(),
            status: Arc::new(status),
            reset_task: None,
            reset_delay: SUCCESS_RESET_DELAY,
        }
    }

    pub fn with_reset_delay(mut self, delay: Duration) -> Self {
        self.reset_delay = delay;
        self
    }

    /// Updates a field value and clears any inline error shown for it.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
        self.field_errors.remove(&field);
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn values(&self) -> &ContactRequest {
        &self.values
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    pub fn status(&self) -> FormStatus {
        self.status.borrow().status
    }

    pub fn banner(&self) -> Option<String> {
        self.status.borrow().banner.clone()
    }

    /// The submit control is disabled while a request is in flight.
    pub fn can_submit(&self) -> bool {
        self.status() != FormStatus::Submitting
    }

    pub fn subscribe(&self) -> watch::Receiver<StatusView> {
        self.status.subscribe()
    }

    /// Validates, submits and records the outcome.
    ///
    /// A validation failure leaves the status untouched and makes no request.
    /// Otherwise any pending auto-reset is cancelled and the previous banner
    /// and inline errors are cleared before the request goes out.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let request = self.values.clone();

        if let Err(errors) = validate(&request) {
            debug!(failures = errors.len(), "Contact form failed client-side validation");
            self.field_errors = errors
                .iter()
                .filter_map(|e| Some((e.field()?, e.message.clone())))
                .collect();
            return SubmitOutcome::Invalid;
        }

        self.cancel_reset();
        self.field_errors.clear();
        self.publish(FormStatus::Submitting, None);

        match self.transport.submit(&request).await {
            Ok(reply) if reply.is_success() => {
                self.values = ContactRequest::default();
                self.publish(FormStatus::Success, Some(reply.body.message));
                self.schedule_reset();
                SubmitOutcome::Sent
            }
            Ok(reply) => {
                for error in reply.body.errors.iter().flatten() {
                    if let Some(field) = error.field() {
                        self.field_errors.insert(field, error.message.clone());
                    }
                }
                let banner = if reply.body.message.is_empty() {
                    FALLBACK_ERROR_MESSAGE.to_string()
                } else {
                    reply.body.message
                };
                debug!(status = reply.status, "Contact form rejected by server");
                self.publish(FormStatus::Error, Some(banner));
                SubmitOutcome::Failed
            }
            Err(err) => {
                warn!("Contact form submission failed: {err}");
                self.publish(FormStatus::Error, Some(NETWORK_ERROR_MESSAGE.to_string()));
                SubmitOutcome::Failed
            }
        }
    }

    fn publish(&self, status: FormStatus, banner: Option<String>) {
        self.status.send_replace(StatusView { status, banner });
    }

    fn schedule_reset(&mut self) {
        let status = Arc::clone(&self.status);
        let delay = self.reset_delay;
        self.reset_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            status.send_if_modified(|view| {
                if view.status != FormStatus::Success {
                    return false;
                }
                *view = StatusView::default();
                true
            });
        }));
    }
}

impl<T> ContactForm<T> {
    fn cancel_reset(&mut self) {
        if let Some(task) = self.reset_task.take() {
            task.abort();
        }
    }
}

impl<T> Drop for ContactForm<T> {
    fn drop(&mut self) {
        self.cancel_reset();
    }
}
