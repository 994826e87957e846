//! Book model and ISBN handling

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// International Standard Book Number, stored as a plain digit string.
///
/// `Display` renders the dash-grouped form, e.g. `978-3-16-148410-0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Isbn(String);

impl Isbn {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Strip the dashes and spaces humans like to type into ISBNs.
    pub fn normalize(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| *c != '-' && !c.is_whitespace())
                .map(|c| c.to_ascii_uppercase())
                .collect(),
        )
    }

    /// 13 digits, or 9 digits followed by a digit or `X` check character.
    pub fn is_valid(&self) -> bool {
        let bytes = self.0.as_bytes();
        match bytes.len() {
            13 => bytes.iter().all(u8::is_ascii_digit),
            10 => {
                bytes[..9].iter().all(u8::is_ascii_digit)
                    && (bytes[9].is_ascii_digit() || bytes[9] == b'X')
            }
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Isbn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return f.write_str(&self.0);
        }
        let s = self.0.as_str();
        match s.len() {
            13 => write!(f, "{}-{}-{}-{}-{}", &s[0..3], &s[3..4], &s[4..6], &s[6..12], &s[12..]),
            _ => write!(f, "{}-{}-{}-{}", &s[0..1], &s[1..3], &s[3..9], &s[9..]),
        }
    }
}

impl From<&str> for Isbn {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Book row
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default)]
    pub isbn: Isbn,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookRequest {
    #[validate(custom(function = "validate_not_blank", message = "title cannot be blank"))]
    pub title: String,
    #[validate(custom(function = "validate_isbn"))]
    pub isbn: String,
}

/// Update book request; every field of the stored record is replaced.
/// Only the id is checked.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookRequest {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank", message = "book ID cannot be blank"))]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub isbn: String,
}

impl From<UpdateBookRequest> for Book {
    fn from(req: UpdateBookRequest) -> Self {
        Book {
            id: req.id.trim().to_string(),
            title: req.title,
            isbn: Isbn::normalize(&req.isbn),
            ..Book::default()
        }
    }
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub(crate) fn validate_isbn(value: &str) -> Result<(), ValidationError> {
    if !Isbn::normalize(value).is_valid() {
        let mut err = ValidationError::new("isbn");
        err.message = Some("isbn must hold 10 or 13 digits".into());
        return Err(err);
    }
    Ok(())
}
