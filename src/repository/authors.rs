//! Authors repository, including the books_authors links

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres, QueryBuilder};

use super::AuthorDataStore;
use crate::{
    error::{AppError, AppResult},
    models::{Author, AuthorBookRow, BookAuthor},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

pub(crate) fn upsert_authors_query(
    authors: &[Author],
    now: DateTime<Utc>,
) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new(
        "INSERT INTO authors (id, first_name, middle_name, last_name, dob, updated_at) ",
    );
    builder.push_values(authors, |mut row, author| {
        row.push_bind(&author.id)
            .push_bind(&author.first_name)
            .push_bind(&author.middle_name)
            .push_bind(&author.last_name)
            .push_bind(author.dob)
            .push_bind(now);
    });
    builder.push(
        r#"
        ON CONFLICT (id) DO UPDATE SET
            first_name = EXCLUDED.first_name,
            middle_name = EXCLUDED.middle_name,
            last_name = EXCLUDED.last_name,
            dob = EXCLUDED.dob,
            updated_at = EXCLUDED.updated_at
        "#,
    );
    builder
}

pub(crate) fn link_books_query(links: &[BookAuthor]) -> QueryBuilder<'_, Postgres> {
    let mut builder = QueryBuilder::new("INSERT INTO books_authors (book_id, author_id) ");
    builder.push_values(links, |mut row, link| {
        row.push_bind(&link.book_id).push_bind(&link.author_id);
    });
    builder.push(" ON CONFLICT DO NOTHING");
    builder
}

#[async_trait]
impl AuthorDataStore for AuthorsRepository {
    async fn read_authors(&self) -> AppResult<Vec<Author>> {
        sqlx::query_as::<_, Author>(
            r#"
            SELECT id, first_name, middle_name, last_name, dob, updated_at
            FROM authors
            ORDER BY last_name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::store("failed to read authors"))
    }

    async fn read_author_and_books(&self, id: &str) -> AppResult<Option<Author>> {
        let rows = sqlx::query_as::<_, AuthorBookRow>(
            r#"
            SELECT a.id, a.first_name, a.middle_name, a.last_name, a.dob, a.updated_at,
                   b.id AS book_id,
                   b.title AS book_title,
                   b.isbn AS book_isbn
            FROM authors a
            JOIN books_authors ab ON ab.author_id = a.id
            JOIN books b ON b.id = ab.book_id
            WHERE a.id = $1
            ORDER BY b.title ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::store("failed to read author"))?;

        Ok(AuthorBookRow::collect(rows))
    }

    async fn delete_author(&self, id: &str) -> AppResult<()> {
        if id.trim().is_empty() {
            return Err(AppError::EmptyBatch("no id submitted to delete"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(AppError::store("failed to begin transaction"))?;
        sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::store("failed deleting author"))?;
        tx.commit()
            .await
            .map_err(AppError::store("failed to commit transaction"))?;
        Ok(())
    }

    async fn upsert_authors(&self, authors: &[Author]) -> AppResult<()> {
        if authors.is_empty() {
            return Err(AppError::EmptyBatch("no authors to upsert"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(AppError::store("failed to begin transaction"))?;
        upsert_authors_query(authors, Utc::now())
            .build()
            .execute(&mut *tx)
            .await
            .map_err(AppError::store("failed upserting authors"))?;
        tx.commit()
            .await
            .map_err(AppError::store("failed to commit transaction"))?;

        tracing::debug!(count = authors.len(), "upserted authors");
        Ok(())
    }

    async fn link_books(&self, links: &[BookAuthor]) -> AppResult<()> {
        if links.is_empty() {
            return Err(AppError::EmptyBatch("no books to link"));
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(AppError::store("failed to begin transaction"))?;
        link_books_query(links)
            .build()
            .execute(&mut *tx)
            .await
            .map_err(AppError::store("failed linking books"))?;
        tx.commit()
            .await
            .map_err(AppError::store("failed to commit transaction"))?;
        Ok(())
    }
}
