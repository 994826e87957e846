//! Data models for the bookshop

pub mod author;
pub mod book;
pub mod book_author;

// Re-export commonly used types
pub use author::{Author, AuthorBookRow};
pub use book::{Book, Isbn};
pub use book_author::BookAuthor;
