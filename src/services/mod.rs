//! Business logic services

pub mod bookshop;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::{
    error::AppResult,
    models::{Author, Book, Isbn},
};

pub use bookshop::BookshopService;

/// Operations the HTTP layer can ask of the bookshop
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Bookshop: Send + Sync {
    /// The author with their books, `None` when unknown
    async fn get_author(&self, id: &str) -> AppResult<Option<Author>>;

    async fn list_authors(&self) -> AppResult<Vec<Author>>;

    async fn remove_author(&self, id: &str) -> AppResult<()>;

    async fn save_authors(&self, authors: Vec<Author>) -> AppResult<()>;

    async fn link_author_books(&self, author_id: &str, book_ids: Vec<String>) -> AppResult<()>;

    /// Create a book unless one with the same ISBN exists
    async fn add_book(&self, title: &str, isbn: Isbn) -> AppResult<Book>;

    async fn remove_books(&self, ids: &[String]) -> AppResult<()>;

    async fn list_books(&self) -> AppResult<Vec<Book>>;

    async fn update_book(&self, book: Book) -> AppResult<()>;
}
