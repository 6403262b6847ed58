//! The contact form schema: one table of predicate rules per field.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::IssueCode;

/// Local part not ending in `.`, `@`, one or more labels that start and end
/// alphanumeric, alphabetic TLD of 2+ characters.
/// Leading dots and `..` in the local part are rejected in [`is_email`].
const EMAIL_PATTERN: &str = concat!(
    r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_'+\-]",
    r"@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
);

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("Failed to compile email regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown contact field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A single predicate applied to a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// At least `n` Unicode scalar values. Whitespace counts.
    MinChars(usize),
    EmailAddress,
}

impl Rule {
    pub fn check(self, value: &str) -> bool {
        match self {
            Rule::MinChars(min) => value.chars().count() >= min,
            Rule::EmailAddress => is_email(value),
        }
    }

    pub fn code(self) -> IssueCode {
        match self {
            Rule::MinChars(_) => IssueCode::TooSmall,
            Rule::EmailAddress => IssueCode::InvalidString,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    pub rule: Rule,
    pub message: &'static str,
}

pub const CONTACT_SCHEMA: &[FieldRule] = &[
    FieldRule {
        field: Field::Name,
        rule: Rule::MinChars(2),
        message: "Name must be at least 2 characters",
    },
    FieldRule {
        field: Field::Email,
        rule: Rule::EmailAddress,
        message: "Please enter a valid email address",
    },
    FieldRule {
        field: Field::Subject,
        rule: Rule::MinChars(5),
        message: "Subject must be at least 5 characters",
    },
    FieldRule {
        field: Field::Message,
        rule: Rule::MinChars(10),
        message: "Message must be at least 10 characters",
    },
];

/// Rules that apply to `field`, in declaration order.
pub fn rules_for(field: Field) -> impl Iterator<Item = &'static FieldRule> {
    CONTACT_SCHEMA.iter().filter(move |rule| rule.field == field)
}

fn is_email(value: &str) -> bool {
    let local = value.split('@').next().unwrap_or_default();
    !local.starts_with('.') && !local.contains("..") && EMAIL_REGEX.is_match(value)
}
