//! Bookshop service

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::Bookshop;
use crate::{
    error::{AppError, AppResult},
    models::{Author, Book, BookAuthor, Isbn},
    repository::{AuthorDataStore, BookDataStore, Repository},
};

#[derive(Clone)]
pub struct BookshopService {
    authors: Arc<dyn AuthorDataStore>,
    books: Arc<dyn BookDataStore>,
}

impl BookshopService {
    pub fn new(authors: Arc<dyn AuthorDataStore>, books: Arc<dyn BookDataStore>) -> Self {
        Self { authors, books }
    }

    /// Service backed by the Postgres repositories
    pub fn from_repository(repository: Repository) -> Self {
        Self::new(Arc::new(repository.authors), Arc::new(repository.books))
    }
}

#[async_trait]
impl Bookshop for BookshopService {
    async fn get_author(&self, id: &str) -> AppResult<Option<Author>> {
        self.authors.read_author_and_books(id).await
    }

    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        self.authors.read_authors().await
    }

    async fn remove_author(&self, id: &str) -> AppResult<()> {
        self.authors.delete_author(id).await
    }

    async fn save_authors(&self, authors: Vec<Author>) -> AppResult<()> {
        self.authors.upsert_authors(&authors).await
    }

    async fn link_author_books(&self, author_id: &str, book_ids: Vec<String>) -> AppResult<()> {
        let links = BookAuthor::for_author(author_id, &book_ids);
        self.authors.link_books(&links).await
    }

    /// The ISBN lookup and the insert are separate statements, so two
    /// concurrent calls with the same ISBN can both succeed.
    async fn add_book(&self, title: &str, isbn: Isbn) -> AppResult<Book> {
        if let Some(existing) = self.books.read_book_by_isbn(&isbn).await? {
            tracing::info!(isbn = %isbn, existing_id = %existing.id, "isbn already in stock");
            return Err(AppError::Duplicate {
                title: existing.title,
            });
        }

        let book = Book {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            isbn,
            ..Book::default()
        };
        self.books.upsert_books(std::slice::from_ref(&book)).await?;

        tracing::info!(id = %book.id, isbn = %book.isbn, "book added");
        Ok(book)
    }

    async fn remove_books(&self, ids: &[String]) -> AppResult<()> {
        self.books.delete_books(ids).await
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.books.read_books().await
    }

    async fn update_book(&self, book: Book) -> AppResult<()> {
        self.books.upsert_books(std::slice::from_ref(&book)).await
    }
}
