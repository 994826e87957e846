//! Author endpoints

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
    models::author::{validate_author, Author, LinkBooksRequest},
    AppState,
};

fn require_id(id: &str) -> AppResult<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::BadRequest("author ID cannot be blank".to_string()));
    }
    Ok(id)
}

/// List all authors ordered by last name
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "List of authors", body = Vec<Author>)
    )
)]
pub async fn list_authors(State(state): State<AppState>) -> AppResult<Response> {
    let authors = state.bookshop.list_authors().await?;
    json_response(StatusCode::OK, &authors)
}

/// Get an author together with their books
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author with books", body = Author),
        (status = 404, description = "No author with linked books", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let id = require_id(&id)?;
    let author = state
        .bookshop
        .get_author(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))?;
    json_response(StatusCode::OK, &author)
}

/// Remove an author; their book links go with them
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 202, description = "Author removed")
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = require_id(&id)?;
    state.bookshop.remove_author(id).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Create or replace a batch of authors
#[utoipa::path(
    put,
    path = "/authors",
    tag = "authors",
    request_body = Vec<Author>,
    responses(
        (status = 202, description = "Authors saved"),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn save_authors(
    State(state): State<AppState>,
    WithRejection(Json(authors), _): WithRejection<Json<Vec<Author>>, AppError>,
) -> AppResult<StatusCode> {
    for author in &authors {
        validate_author(author)
            .map_err(|e| AppError::BadRequest(format!("invalid author '{}': {}", author.id, e)))?;
    }

    state.bookshop.save_authors(authors).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Link existing books to an author
#[utoipa::path(
    post,
    path = "/authors/{id}/books",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    request_body = LinkBooksRequest,
    responses(
        (status = 202, description = "Books linked"),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn link_books(
    State(state): State<AppState>,
    Path(id): Path<String>,
    WithRejection(Json(req), _): WithRejection<Json<LinkBooksRequest>, AppError>,
) -> AppResult<StatusCode> {
    let id = require_id(&id)?;
    req.validate()?;

    state.bookshop.link_author_books(id, req.book_ids).await?;
    Ok(StatusCode::ACCEPTED)
}
