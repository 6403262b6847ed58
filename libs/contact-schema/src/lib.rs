//! Contact form wire types and the validation schema shared by the API
//! handler and the form client.
//!
//! The four field constraints are declared once in [`CONTACT_SCHEMA`]; every
//! check on either side of the wire is derived from that table.

pub mod models;
pub mod schema;
pub mod validation;

pub use models::{
    ContactRequest, ContactResponse, FieldError, IssueCode, MSG_DELIVERY_FAILED, MSG_INTERNAL,
    MSG_INVALID, MSG_SENT,
};
pub use schema::{Field, FieldRule, Rule, UnknownField, CONTACT_SCHEMA};
pub use validation::{validate, validate_field, validate_json, ValidationErrors};
