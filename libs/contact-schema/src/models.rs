use serde::{Deserialize, Serialize};

use crate::schema::Field;

pub const MSG_SENT: &str = "Message sent successfully!";
pub const MSG_INVALID: &str = "Invalid form data";
pub const MSG_DELIVERY_FAILED: &str = "Failed to send email";
pub const MSG_INTERNAL: &str = "Internal server error";

/// Body of `POST /api/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactRequest {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        };
        *slot = value.into();
    }
}

/// Machine-readable kind of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    TooSmall,
    InvalidString,
    InvalidType,
    #[serde(other)]
    Custom,
}

/// A validation failure attributable to one input field.
///
/// `path` holds the field name as its first segment; a failure of the body
/// as a whole carries an empty path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub code: IssueCode,
    pub message: String,
    #[serde(default)]
    pub path: Vec<String>,
}

impl FieldError {
    pub fn new(field: Field, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: vec![field.as_str().to_string()],
        }
    }

    /// The field this error points at, if its path names a known field.
    pub fn field(&self) -> Option<Field> {
        self.path.first().and_then(|segment| segment.parse().ok())
    }
}

/// Body of every `/api/contact` response, success or failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ContactResponse {
    pub fn sent() -> Self {
        Self {
            success: true,
            message: MSG_SENT.to_string(),
            errors: None,
        }
    }

    pub fn invalid(errors: Vec<FieldError>) -> Self {
        Self {
            success: false,
            message: MSG_INVALID.to_string(),
            errors: Some(errors),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            errors: None,
        }
    }
}
