//! Book-Author junction model (N:M relationship)

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Linking row between a book and one of its authors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookAuthor {
    pub book_id: String,
    pub author_id: String,
}

impl BookAuthor {
    /// Links from one author to each of the given books
    pub fn for_author(author_id: &str, book_ids: &[String]) -> Vec<BookAuthor> {
        book_ids
            .iter()
            .map(|book_id| BookAuthor {
                book_id: book_id.clone(),
                author_id: author_id.to_string(),
            })
            .collect()
    }
}
