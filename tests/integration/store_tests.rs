//! Store tests against a live PostgreSQL database (DATABASE_URL)

use bookshop_server::{
    error::AppError,
    models::{Author, Book, BookAuthor, Isbn},
    repository::{AuthorDataStore, BookDataStore, Repository},
};
use chrono::NaiveDate;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

async fn repository() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Repository::new(pool)
}

/// Ids unique to one test run so tests can share a database
fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// A 13-digit ISBN nobody else in the database is using
fn unique_isbn() -> Isbn {
    let digits: String = Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(13)
        .collect();
    Isbn::new(digits)
}

fn book(id: &str, title: &str) -> Book {
    Book {
        id: id.to_string(),
        title: title.to_string(),
        isbn: unique_isbn(),
        ..Book::default()
    }
}

#[tokio::test]
#[ignore]
async fn test_upsert_books_last_write_wins() {
    let repo = repository().await;
    let id_a = unique("abc");
    let id_b = unique("zzz");

    repo.books
        .upsert_books(&[book(&id_a, "titleA"), book(&id_b, "titleZ")])
        .await
        .expect("first upsert");

    let second = vec![book(&id_a, "titleXXXX"), book(&id_b, "titleZZZZ")];
    repo.books.upsert_books(&second).await.expect("second upsert");

    let books = repo.books.read_books().await.expect("read books");
    let a = books.iter().find(|b| b.id == id_a).expect("book a listed");
    let b = books.iter().find(|b| b.id == id_b).expect("book b listed");
    assert_eq!(a.title, "titleXXXX");
    assert_eq!(a.isbn, second[0].isbn);
    assert_eq!(b.title, "titleZZZZ");
    assert!(a.created_at.is_some());
    assert!(a.updated_at >= a.created_at);
}

#[tokio::test]
#[ignore]
async fn test_read_books_ordered_by_title() {
    let repo = repository().await;
    let prefix = Uuid::new_v4().simple().to_string();
    let later = book(&unique("later"), &format!("{} b", prefix));
    let earlier = book(&unique("earlier"), &format!("{} a", prefix));
    repo.books
        .upsert_books(&[later.clone(), earlier.clone()])
        .await
        .expect("upsert");

    let books = repo.books.read_books().await.expect("read books");
    let position = |id: &str| books.iter().position(|b| b.id == id).expect("book listed");
    assert!(position(&earlier.id) < position(&later.id));
}

#[tokio::test]
#[ignore]
async fn test_read_book_by_isbn() {
    let repo = repository().await;
    let stored = book(&unique("isbn"), "titleIsbn");
    repo.books.upsert_books(std::slice::from_ref(&stored)).await.expect("upsert");

    let found = repo
        .books
        .read_book_by_isbn(&stored.isbn)
        .await
        .expect("read by isbn")
        .expect("book found");
    assert_eq!(found.id, stored.id);

    let missing = repo
        .books
        .read_book_by_isbn(&unique_isbn())
        .await
        .expect("read by isbn");
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore]
async fn test_delete_books() {
    let repo = repository().await;
    let id_c = unique("def");
    let id_d = unique("ghi");
    repo.books
        .upsert_books(&[book(&id_c, "titleC"), book(&id_d, "titleD")])
        .await
        .expect("upsert");

    repo.books
        .delete_books(&[id_c.clone(), id_d.clone()])
        .await
        .expect("delete");

    let books = repo.books.read_books().await.expect("read books");
    assert!(!books.iter().any(|b| b.id == id_c || b.id == id_d));

    // unknown ids are not an error
    repo.books
        .delete_books(&[unique("missing")])
        .await
        .expect("delete unknown id");

    let err = repo.books.delete_books(&[]).await.unwrap_err();
    assert!(matches!(err, AppError::EmptyBatch(_)));
}

#[tokio::test]
#[ignore]
async fn test_upsert_empty_batch_fails() {
    let repo = repository().await;
    assert!(matches!(
        repo.books.upsert_books(&[]).await,
        Err(AppError::EmptyBatch(_))
    ));
    assert!(matches!(
        repo.authors.upsert_authors(&[]).await,
        Err(AppError::EmptyBatch(_))
    ));
}

#[tokio::test]
#[ignore]
async fn test_authors_upsert_join_and_delete() {
    let repo = repository().await;
    let dob = NaiveDate::from_ymd_opt(1970, 1, 1);
    let author_id = unique("auth");
    let author = Author {
        id: author_id.clone(),
        first_name: "first".to_string(),
        middle_name: "middle".to_string(),
        last_name: "last".to_string(),
        dob,
        ..Author::default()
    };
    repo.authors
        .upsert_authors(std::slice::from_ref(&author))
        .await
        .expect("upsert author");

    // nothing linked yet
    assert!(repo
        .authors
        .read_author_and_books(&author_id)
        .await
        .expect("joined read")
        .is_none());

    let first = book(&unique("b1"), "A first book");
    let second = book(&unique("b2"), "B second book");
    repo.books
        .upsert_books(&[first.clone(), second.clone()])
        .await
        .expect("upsert books");
    repo.authors
        .link_books(&BookAuthor::for_author(
            &author_id,
            &[second.id.clone(), first.id.clone()],
        ))
        .await
        .expect("link books");

    let joined = repo
        .authors
        .read_author_and_books(&author_id)
        .await
        .expect("joined read")
        .expect("author found");
    assert_eq!(joined.first_name, "first");
    assert_eq!(joined.dob, dob);
    let ids: Vec<&str> = joined.books.iter().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);

    let updated = Author {
        last_name: "update".to_string(),
        ..author.clone()
    };
    repo.authors
        .upsert_authors(std::slice::from_ref(&updated))
        .await
        .expect("second upsert");
    let authors = repo.authors.read_authors().await.expect("read authors");
    let stored = authors.iter().find(|a| a.id == author_id).expect("author listed");
    assert_eq!(stored.last_name, "update");
    assert!(stored.books.is_empty());

    repo.authors.delete_author(&author_id).await.expect("delete author");
    let authors = repo.authors.read_authors().await.expect("read authors");
    assert!(!authors.iter().any(|a| a.id == author_id));

    assert!(matches!(
        repo.authors.delete_author("  ").await,
        Err(AppError::EmptyBatch(_))
    ));
}
