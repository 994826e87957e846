//! Author model and related types

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::book::{validate_not_blank, Book, Isbn};

/// Format of a date of birth typed by a human
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of a date of birth that went through a database round trip
const MIDNIGHT_UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Author row; `books` is only filled by the joined read
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub middle_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    #[serde(
        default,
        deserialize_with = "deserialize_dob",
        serialize_with = "serialize_dob",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, format = Date, example = "1970-01-01")]
    pub dob: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[sqlx(skip)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub books: Vec<Book>,
}

/// Parse a date of birth given either as `1970-01-01` or `1970-01-01T00:00:00Z`.
pub fn parse_dob(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    if value.contains("T00:00:00Z") {
        return NaiveDateTime::parse_from_str(value, MIDNIGHT_UTC_FORMAT).map(|dt| dt.date());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
}

fn deserialize_dob<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_dob(value).map(Some).map_err(serde::de::Error::custom),
    }
}

fn serialize_dob<S>(dob: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match dob {
        Some(date) => serializer.collect_str(&date.format(DATE_FORMAT)),
        None => serializer.serialize_none(),
    }
}

/// One row of the authors/books/books_authors join
#[derive(Debug, Clone, FromRow)]
pub struct AuthorBookRow {
    pub id: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub dob: Option<NaiveDate>,
    pub updated_at: Option<DateTime<Utc>>,
    pub book_id: String,
    pub book_title: String,
    pub book_isbn: Isbn,
}

impl AuthorBookRow {
    /// Fold joined rows into one author carrying one book per row.
    ///
    /// Returns `None` when there are no rows.
    pub fn collect(rows: Vec<AuthorBookRow>) -> Option<Author> {
        let first = rows.first()?;
        let mut author = Author {
            id: first.id.clone(),
            first_name: first.first_name.clone(),
            middle_name: first.middle_name.clone(),
            last_name: first.last_name.clone(),
            dob: first.dob,
            updated_at: first.updated_at,
            books: Vec::with_capacity(rows.len()),
        };
        author.books.extend(rows.into_iter().map(|row| Book {
            id: row.book_id,
            title: row.book_title,
            isbn: row.book_isbn,
            ..Book::default()
        }));
        Some(author)
    }
}

/// Request body linking books to an author
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LinkBooksRequest {
    #[validate(length(min = 1, message = "no book ids submitted"))]
    pub book_ids: Vec<String>,
}

/// Validate an author submitted for upsert
pub fn validate_author(author: &Author) -> Result<(), validator::ValidationError> {
    validate_not_blank(&author.id)?;
    validate_not_blank(&author.last_name)
}
