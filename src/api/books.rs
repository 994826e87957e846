//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Json,
};
use axum_extra::extract::WithRejection;
use validator::Validate;

use super::json_response;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBookRequest, Isbn, UpdateBookRequest},
    AppState,
};

/// List all books ordered by title
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "List of books", body = Vec<Book>),
        (status = 500, description = "Datastore failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Response> {
    let books = state.bookshop.list_books().await?;
    json_response(StatusCode::OK, &books)
}

/// Add a book, generating its id, unless the ISBN is already stocked
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 422, description = "ISBN already exists", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<CreateBookRequest>, AppError>,
) -> AppResult<Response> {
    req.validate()?;

    let created = state
        .bookshop
        .add_book(&req.title, Isbn::normalize(&req.isbn))
        .await?;
    json_response(StatusCode::CREATED, &created)
}

/// Replace a book's title and ISBN
#[utoipa::path(
    patch,
    path = "/books",
    tag = "books",
    request_body = UpdateBookRequest,
    responses(
        (status = 202, description = "Book updated"),
        (status = 400, description = "Invalid input or blank id", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateBookRequest>, AppError>,
) -> AppResult<StatusCode> {
    req.validate()?;

    state.bookshop.update_book(Book::from(req)).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Remove a book by id
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 202, description = "Book removed"),
        (status = 400, description = "Blank id", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest("book ID cannot be blank".to_string()));
    }

    state.bookshop.remove_books(&[id.to_string()]).await?;
    Ok(StatusCode::ACCEPTED)
}
