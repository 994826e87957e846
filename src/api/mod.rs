//! API handlers for the bookshop REST endpoints

pub mod authors;
pub mod books;
pub mod health;
pub mod openapi;

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use serde::Serialize;
use tower_http::{set_header::SetResponseHeaderLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{error::AppResult, AppState};

/// Encode `value` as the JSON body of a response with the given status.
///
/// Encoding failures surface as 500.
pub(crate) fn json_response<T: Serialize>(status: StatusCode, value: &T) -> AppResult<Response> {
    let body = serde_json::to_vec(value)?;
    Ok((
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response())
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    let router = Router::new()
        .route("/health", get(health::health_check))
        // Books
        .route(
            "/books",
            get(books::list_books)
                .post(books::create_book)
                .patch(books::update_book),
        )
        .route("/books/:id", delete(books::delete_book))
        // Authors
        .route(
            "/authors",
            get(authors::list_authors).put(authors::save_authors),
        )
        .route(
            "/authors/:id",
            get(authors::get_author).delete(authors::delete_author),
        )
        .route("/authors/:id/books", post(authors::link_books))
        .with_state(state)
        .merge(openapi::create_openapi_router());

    with_middleware(router, timeout)
}

/// Wrap `router` in the request timeout, the default JSON content type and
/// request tracing. The content-type layer sits outside the timeout so the
/// 408 it produces is labelled too.
fn with_middleware(router: Router, timeout: Duration) -> Router {
    router
        .layer(TimeoutLayer::new(timeout))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(TraceLayer::new_for_http())
}
