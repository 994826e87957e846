//! Books repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, QueryBuilder};

use super::BookDataStore;
use crate::{
    error::{AppError, AppResult},
    models::{Book, Isbn},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Build the multi-row upsert for `books`. `created_at` survives a conflict.
pub(crate) fn upsert_books_query(books: &[Book], now: DateTime<Utc>) -> QueryBuilder<'_, Postgres> {
    let mut builder =
        QueryBuilder::new("INSERT INTO books (id, title, isbn, created_at, updated_at) ");
    builder.push_values(books, |mut row, book| {
        row.push_bind(&book.id)
            .push_bind(&book.title)
            .push_bind(&book.isbn)
            .push_bind(now)
            .push_bind(now);
    });
    builder.push(
        r#"
        ON CONFLICT (id) DO UPDATE SET
            title = EXCLUDED.title,
            isbn = EXCLUDED.isbn,
            updated_at = EXCLUDED.updated_at
        "#,
    );
    builder
}

#[async_trait]
impl BookDataStore for BooksRepository {
    async fn read_books(&self) -> AppResult<Vec<Book>> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, isbn, created_at, updated_at FROM books ORDER BY title ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::store("failed to read books"))
    }

    async fn read_book_by_isbn(&self, isbn: &Isbn) -> AppResult<Option<Book>> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, isbn, created_at, updated_at FROM books WHERE isbn = $1 LIMIT 1",
        )
        .bind(isbn)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::store("failed to read book"))
    }

    async fn upsert_books(&self, books: &[Book]) -> AppResult<()> {
        if books.is_empty() {
            return Err(AppError::EmptyBatch("no books to upsert"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(AppError::store("failed to begin transaction"))?;
        upsert_books_query(books, Utc::now())
            .build()
            .execute(&mut *tx)
            .await
            .map_err(AppError::store("failed upserting books"))?;
        tx.commit()
            .await
            .map_err(AppError::store("failed to commit transaction"))?;

        tracing::debug!(count = books.len(), "upserted books");
        Ok(())
    }

    async fn delete_books(&self, ids: &[String]) -> AppResult<()> {
        if ids.is_empty() {
            return Err(AppError::EmptyBatch("no ids submitted to delete"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(AppError::store("failed to begin transaction"))?;
        let result = sqlx::query("DELETE FROM books WHERE id = ANY($1)")
            .bind(ids)
            .execute(&mut *tx)
            .await
            .map_err(AppError::store("failed deleting books"))?;
        tx.commit()
            .await
            .map_err(AppError::store("failed to commit transaction"))?;

        tracing::debug!(requested = ids.len(), deleted = result.rows_affected(), "deleted books");
        Ok(())
    }
}
