//! Repository layer for database operations

pub mod authors;
pub mod books;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Author, Book, BookAuthor, Isbn},
};

/// Storage of book rows
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BookDataStore: Send + Sync {
    /// All books ordered by title
    async fn read_books(&self) -> AppResult<Vec<Book>>;

    async fn read_book_by_isbn(&self, isbn: &Isbn) -> AppResult<Option<Book>>;

    /// Insert the books, overwriting rows that share an id
    async fn upsert_books(&self, books: &[Book]) -> AppResult<()>;

    /// Delete books by id; unknown ids are ignored
    async fn delete_books(&self, ids: &[String]) -> AppResult<()>;
}

/// Storage of author rows and their links to books
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthorDataStore: Send + Sync {
    /// All authors ordered by last name
    async fn read_authors(&self) -> AppResult<Vec<Author>>;

    /// The author with their linked books, or `None` when nothing matches the id
    async fn read_author_and_books(&self, id: &str) -> AppResult<Option<Author>>;

    async fn delete_author(&self, id: &str) -> AppResult<()>;

    async fn upsert_authors(&self, authors: &[Author]) -> AppResult<()>;

    async fn link_books(&self, links: &[BookAuthor]) -> AppResult<()>;
}

/// Per-table repositories sharing one connection pool
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
    pub authors: authors::AuthorsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            authors: authors::AuthorsRepository::new(pool),
        }
    }
}

/// A lazy pool pointed at a port nothing listens on
#[cfg(test)]
fn unreachable_pool() -> Pool<Postgres> {
    use std::time::Duration;

    use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

    PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy_with(PgConnectOptions::new().host("127.0.0.1").port(1))
}
