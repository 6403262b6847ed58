//! Contact form client.
//!
//! Holds the field values, validates them with the shared schema before any
//! request is made, submits through a [`ContactTransport`], and drives the
//! `idle → submitting → success | error` status that the page renders.

pub mod form;
pub mod transport;

pub use form::{
    ContactForm, FormStatus, StatusView, SubmitOutcome, FALLBACK_ERROR_MESSAGE,
    NETWORK_ERROR_MESSAGE, SUCCESS_RESET_DELAY,
};
pub use transport::{ContactTransport, HttpTransport, Reply, TransportError, CONTACT_PATH};
