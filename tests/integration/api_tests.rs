//! API integration tests against a running server backed by PostgreSQL

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Category names are unique, so every test gets its own
fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("clock before epoch")
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

async fn create_category(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/category", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No category ID")
}

async fn create_book(client: &Client, category_id: i64, copies: i64) -> Value {
    let response = client
        .post(format!("{}/book", BASE_URL))
        .json(&json!({
            "title": "Dune",
            "author": "Herbert",
            "description": "d",
            "publicationYear": 1965,
            "copies": copies,
            "categoryId": category_id
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn cleanup(client: &Client, book_id: i64, category_id: i64) {
    let _ = client
        .delete(format!("{}/book/{}", BASE_URL, book_id))
        .send()
        .await;
    let _ = client
        .delete(format!("{}/category/{}", BASE_URL, category_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
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
async fn test_duplicate_category_is_rejected() {
    let client = Client::new();
    let name = unique_name("dup");
    let category_id = create_category(&client, &name).await;

    let response = client
        .post(format!("{}/category", BASE_URL))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Category already exists");

    let _ = client
        .delete(format!("{}/category/{}", BASE_URL, category_id))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_reserve_and_return_cycle() {
    let client = Client::new();
    let category_id = create_category(&client, &unique_name("sci-fi")).await;
    let book = create_book(&client, category_id, 3).await;
    let book_id = book["id"].as_i64().expect("No book ID");
    assert_eq!(book["availableCopies"], 3);

    for expected in [2, 1, 0] {
        let response = client
            .post(format!("{}/book/{}/reserve", BASE_URL, book_id))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = response.json().await.expect("Failed to parse response");
        assert_eq!(body["availableCopies"], expected);
    }

    let response = client
        .post(format!("{}/book/{}/reserve", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "No available copies");

    let response = client
        .post(format!("{}/book/{}/return", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["availableCopies"], 1);

    cleanup(&client, book_id, category_id).await;
}

#[tokio::test]
#[ignore]
async fn test_concurrent_reservations_never_oversell() {
    let client = Client::new();
    let category_id = create_category(&client, &unique_name("race")).await;
    let book = create_book(&client, category_id, 3).await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..20 {
        let client = client.clone();
        tasks.spawn(async move {
            client
                .post(format!("{}/book/{}/reserve", BASE_URL, book_id))
                .send()
                .await
                .expect("Failed to send request")
                .status()
        });
    }

    let mut reserved = 0;
    let mut refused = 0;
    while let Some(status) = tasks.join_next().await {
        let status = status.expect("Reservation task panicked");
        if status == StatusCode::OK {
            reserved += 1;
        } else if status == StatusCode::BAD_REQUEST {
            refused += 1;
        } else {
            panic!("Unexpected status {}", status);
        }
    }
    assert_eq!(reserved, 3);
    assert_eq!(refused, 17);

    let body: Value = client
        .get(format!("{}/book/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["availableCopies"], 0);

    cleanup(&client, book_id, category_id).await;
}

#[tokio::test]
#[ignore]
async fn test_filter_by_category_name() {
    let client = Client::new();
    let name = unique_name("sci-fi");
    let category_id = create_category(&client, &name).await;
    let book = create_book(&client, category_id, 1).await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .get(format!("{}/book", BASE_URL))
        .query(&[("category", name.as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array");
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["category"]["name"], name);

    cleanup(&client, book_id, category_id).await;
}

#[tokio::test]
#[ignore]
async fn test_unmatched_filter_is_no_content() {
    let client = Client::new();

    let response = client
        .get(format!("{}/book", BASE_URL))
        .query(&[("title", unique_name("no-such-title").as_str())])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
#[ignore]
async fn test_category_with_books_cannot_be_deleted() {
    let client = Client::new();
    let category_id = create_category(&client, &unique_name("kept")).await;
    let book = create_book(&client, category_id, 1).await;
    let book_id = book["id"].as_i64().expect("No book ID");

    let response = client
        .delete(format!("{}/category/{}", BASE_URL, category_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    cleanup(&client, book_id, category_id).await;

    let response = client
        .get(format!("{}/category/{}", BASE_URL, category_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore]
async fn test_update_missing_book() {
    let client = Client::new();
    let category_id = create_category(&client, &unique_name("upd")).await;

    let response = client
        .put(format!("{}/book/{}", BASE_URL, i32::MAX))
        .json(&json!({
            "title": "Dune",
            "author": "Herbert",
            "description": "d",
            "publicationYear": 1965,
            "copies": 1,
            "categoryId": category_id
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .get(format!("{}/book", BASE_URL))
        .query(&[("category", category_id.to_string())])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let _ = client
        .delete(format!("{}/category/{}", BASE_URL, category_id))
        .send()
        .await;
}
