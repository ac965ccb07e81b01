//! API integration tests
//!
//! Run against a live server with: cargo test -- --ignored

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8000/api";

/// Create a book and return its id
async fn create_book(client: &Client, book: Value) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&book)
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "book created successfully");
    body["data"]["id"].as_i64().expect("No book ID")
}

async fn get_book(client: &Client, id: i64) -> reqwest::Response {
    client
        .get(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
}

async fn delete_book(client: &Client, id: i64) -> reqwest::Response {
    client
        .delete(format!("{}/books/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to send request")
}

async fn book_titles(client: &Client) -> Vec<String> {
    let body: Value = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    body["data"]
        .as_array()
        .expect("No book list")
        .iter()
        .filter_map(|book| book["title"].as_str().map(str::to_string))
        .collect()
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
async fn test_create_and_get_book() {
    let client = Client::new();
    let id = create_book(
        &client,
        json!({ "author": "Ursula K. Le Guin", "title": "The Lathe of Heaven", "publisher": "Avon" }),
    )
    .await;

    let response = get_book(&client, id).await;
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "book fetched successfully");
    assert_eq!(body["data"]["author"], "Ursula K. Le Guin");
    assert_eq!(body["data"]["title"], "The Lathe of Heaven");
    assert_eq!(body["data"]["publisher"], "Avon");

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_list_books_contains_created() {
    let client = Client::new();
    let mut ids = Vec::new();
    for title in ["Kindred", "Dawn", "Wild Seed"] {
        ids.push(create_book(&client, json!({ "author": "Octavia E. Butler", "title": title })).await);
    }

    let body: Value = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");

    let listed: Vec<i64> = body["data"]
        .as_array()
        .expect("No book list")
        .iter()
        .filter_map(|book| book["id"].as_i64())
        .collect();
    assert!(listed.len() >= ids.len());
    for id in &ids {
        assert!(listed.contains(id));
    }

    for id in ids {
        delete_book(&client, id).await;
    }
}

#[tokio::test]
#[ignore]
async fn test_get_missing_book() {
    let client = Client::new();
    let response = get_book(&client, i32::MAX as i64).await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_update_book_keeps_other_fields() {
    let client = Client::new();
    let id = create_book(
        &client,
        json!({ "author": "Stanislaw Lem", "title": "Solaris", "publisher": "Walker" }),
    )
    .await;

    let response = client
        .put(format!("{}/books/{}", BASE_URL, id))
        .json(&json!({ "title": "Solaris (revised)" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "book updated successfully");

    let body: Value = get_book(&client, id)
        .await
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["title"], "Solaris (revised)");
    assert_eq!(body["data"]["author"], "Stanislaw Lem");
    assert_eq!(body["data"]["publisher"], "Walker");

    delete_book(&client, id).await;
}

#[tokio::test]
#[ignore]
async fn test_update_missing_book() {
    let client = Client::new();
    let response = client
        .put(format!("{}/books/{}", BASE_URL, i32::MAX))
        .json(&json!({ "title": "Nothing" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_delete_book() {
    let client = Client::new();
    let id = create_book(&client, json!({ "title": "Ephemeral" })).await;

    let response = delete_book(&client, id).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "book deleted successfully");

    assert_eq!(get_book(&client, id).await.status(), 404);
    assert_eq!(delete_book(&client, id).await.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_create_user_embeds_book() {
    let client = Client::new();
    let book_id = create_book(
        &client,
        json!({ "author": "Frank Herbert", "title": "Dune", "publisher": "Chilton" }),
    )
    .await;

    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "username": "paul", "name": "Paul Atreides", "bookId": book_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "user created successfully");
    let user_id = body["data"]["id"].as_i64().expect("No user ID");
    assert_eq!(body["data"]["book"]["title"], "Dune");

    let body: Value = client
        .get(format!("{}/users/{}", BASE_URL, user_id))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "paul");
    assert_eq!(body["data"]["bookId"], book_id);
    assert_eq!(body["data"]["book"]["id"], book_id);
    assert_eq!(body["data"]["book"]["author"], "Frank Herbert");
    assert_eq!(body["data"]["book"]["publisher"], "Chilton");

    // Still referenced by the user
    assert_eq!(delete_book(&client, book_id).await.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_create_user_without_book() {
    let client = Client::new();
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "username": "", "name": "Nobody", "bookId": 0 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["bookId"], 0);
    assert!(body["data"]["book"].is_null());
}

#[tokio::test]
#[ignore]
async fn test_create_user_with_unknown_book() {
    let client = Client::new();
    let response = client
        .post(format!("{}/users", BASE_URL))
        .json(&json!({ "username": "ghost", "name": "Ghost", "bookId": i32::MAX }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 409);
}

#[tokio::test]
#[ignore]
async fn test_list_users() {
    let client = Client::new();
    let response = client
        .get(format!("{}/users", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "users fetched successfully");
    assert!(body["data"].is_array());
}

#[tokio::test]
#[ignore]
async fn test_malformed_json_creates_nothing() {
    let client = Client::new();
    let marker = "malformed-request-marker";

    for path in ["books", "users"] {
        let response = client
            .post(format!("{}/{}", BASE_URL, path))
            .header("Content-Type", "application/json")
            .body(format!("{{\"title\": \"{}\", \"username\": \"{}\"", marker, marker))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), 400);
    }

    assert!(!book_titles(&client).await.iter().any(|title| title == marker));
}
