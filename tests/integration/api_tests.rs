//! API integration tests against a running server

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// A 13-digit ISBN unlikely to be stocked already
fn fresh_isbn() -> String {
    uuid::Uuid::new_v4()
        .as_u128()
        .to_string()
        .chars()
        .take(13)
        .collect()
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_create_update_and_delete_book() {
    let client = Client::new();
    let isbn = fresh_isbn();

    // Create
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": "titleA", "isbn": isbn }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = response.json().await.expect("Failed to parse response");
    let id = body["id"].as_str().expect("No book ID").to_string();
    assert_eq!(body["isbn"], isbn.as_str());

    // Same ISBN again
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({ "title": "titleB", "isbn": isbn }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Listed
    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    let books: Value = response.json().await.expect("Failed to parse response");
    assert!(books
        .as_array()
        .expect("books array")
        .iter()
        .any(|b| b["id"] == id.as_str()));

    // Update
    let response = client
        .patch(format!("{}/books", BASE_URL))
        .json(&json!({ "id": id, "title": "titleXXXX", "isbn": isbn }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    assert!(response.text().await.expect("body").is_empty());

    // Delete
    let response = client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
#[ignore]
async fn test_update_book_without_id() {
    let client = Client::new();

    let response = client
        .patch(format!("{}/books", BASE_URL))
        .json(&json!({ "title": "titleA", "isbn": "9783161484100" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
