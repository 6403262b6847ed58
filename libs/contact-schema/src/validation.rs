use serde_json::Value;
use thiserror::Error;

use crate::models::{ContactRequest, FieldError, IssueCode};
use crate::schema::{rules_for, Field};

/// Every field failure found in one submission, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .0.len())]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

/// Checks one value against its field's rules and returns the first failure.
pub fn validate_field(field: Field, value: &str) -> Option<FieldError> {
    rules_for(field)
        .find(|rule| !rule.rule.check(value))
        .map(|rule| FieldError::new(field, rule.rule.code(), rule.message))
}

/// Validates a fully typed request. Does not stop at the first failing field.
pub fn validate(request: &ContactRequest) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = Field::ALL
        .into_iter()
        .filter_map(|field| validate_field(field, request.get(field)))
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

/// Validates an untyped JSON body and extracts the request from it.
///
/// Missing, null and non-string fields are reported alongside rule failures
/// so the caller always sees the complete list. Unknown keys are ignored.
pub fn validate_json(body: &Value) -> Result<ContactRequest, ValidationErrors> {
    let Some(object) = body.as_object() else {
        return Err(ValidationErrors(vec![FieldError {
            code: IssueCode::InvalidType,
            message: format!("Expected object, received {}", kind_of(body)),
            path: Vec::new(),
        }]));
    };

    let mut request = ContactRequest::default();
    let mut errors = Vec::new();

    for field in Field::ALL {
        match object.get(field.as_str()) {
            None => errors.push(FieldError::new(field, IssueCode::InvalidType, "Required")),
            Some(Value::String(value)) => {
                if let Some(error) = validate_field(field, value) {
                    errors.push(error);
                }
                request.set(field, value.as_str());
            }
            Some(other) => errors.push(FieldError::new(
                field,
                IssueCode::InvalidType,
                format!("Expected string, received {}", kind_of(other)),
            )),
        }
    }

    if errors.is_empty() {
        Ok(request)
    } else {
        Err(ValidationErrors(errors))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(name: &str, email: &str, subject: &str, message: &str) -> ContactRequest {
        ContactRequest {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    fn paths(errors: &ValidationErrors) -> Vec<&str> {
        errors.iter().map(|e| e.path[0].as_str()).collect()
    }

    #[test]
    fn test_valid_request_passes() {
        let r = request("Al", "al@example.com", "Hello there", "This is a test message.");
        assert!(validate(&r).is_ok());
    }

    #[test]
    fn test_boundary_lengths_pass() {
        let r = request("Al", "a@b.co", "Hello", "0123456789");
        assert!(validate(&r).is_ok());
    }

    #[test]
    fn test_all_invalid_fields_are_reported() {
        let r = request("A", "not-an-email", "Hi", "short");
        let errors = validate(&r).unwrap_err();
        assert_eq!(paths(&errors), vec!["name", "email", "subject", "message"]);
        assert_eq!(errors.0[0].message, "Name must be at least 2 characters");
        assert_eq!(errors.0[1].message, "Please enter a valid email address");
        assert_eq!(errors.0[1].code, IssueCode::InvalidString);
        assert_eq!(errors.0[2].message, "Subject must be at least 5 characters");
        assert_eq!(errors.0[3].message, "Message must be at least 10 characters");
    }

    #[test]
    fn test_single_invalid_field() {
        let r = request("Al", "al@example.com", "Hey", "This is a test message.");
        let errors = validate(&r).unwrap_err();
        assert_eq!(paths(&errors), vec!["subject"]);
        assert_eq!(errors.0[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn test_validation_is_repeatable() {
        let r = request("A", "nope", "Hi", "short");
        assert_eq!(validate(&r).unwrap_err(), validate(&r).unwrap_err());

        let body = json!({"name": "A", "email": 3});
        assert_eq!(
            validate_json(&body).unwrap_err(),
            validate_json(&body).unwrap_err()
        );
    }

    #[test]
    fn test_validate_field_inline() {
        assert!(validate_field(Field::Email, "al@example.com").is_none());
        let error = validate_field(Field::Email, "al@").unwrap();
        assert_eq!(error.field(), Some(Field::Email));
    }

    #[test]
    fn test_validate_json_extracts_request() {
        let body = json!({
            "name": "Al",
            "email": "al@example.com",
            "subject": "Hello there",
            "message": "This is a test message.",
            "extra": true
        });
        let r = validate_json(&body).unwrap();
        assert_eq!(r.name, "Al");
        assert_eq!(r.message, "This is a test message.");
    }

    #[test]
    fn test_validate_json_missing_fields_are_required() {
        let errors = validate_json(&json!({"name": "Al"})).unwrap_err();
        assert_eq!(paths(&errors), vec!["email", "subject", "message"]);
        assert!(errors.iter().all(|e| e.message == "Required"));
        assert!(errors.iter().all(|e| e.code == IssueCode::InvalidType));
    }

    #[test]
    fn test_validate_json_wrong_types() {
        let body = json!({
            "name": null,
            "email": 42,
            "subject": ["Hello there"],
            "message": "This is a test message."
        });
        let errors = validate_json(&body).unwrap_err();
        assert_eq!(paths(&errors), vec!["name", "email", "subject"]);
        assert_eq!(errors.0[0].message, "Expected string, received null");
        assert_eq!(errors.0[1].message, "Expected string, received number");
        assert_eq!(errors.0[2].message, "Expected string, received array");
    }

    #[test]
    fn test_validate_json_mixes_type_and_rule_failures() {
        let body = json!({"name": "A", "email": false, "subject": "Hello there"});
        let errors = validate_json(&body).unwrap_err();
        assert_eq!(paths(&errors), vec!["name", "email", "message"]);
        assert_eq!(errors.0[0].code, IssueCode::TooSmall);
        assert_eq!(errors.0[2].message, "Required");
    }

    #[test]
    fn test_validate_json_rejects_non_object() {
        let errors = validate_json(&json!(["Al"])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.0[0].path.is_empty());
        assert_eq!(errors.0[0].message, "Expected object, received array");
        assert_eq!(errors.0[0].field(), None);
    }
}
