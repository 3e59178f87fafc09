//! Route-level tests for the favorites API against an in-memory database.

use axum::http::StatusCode;
use axum_test::TestServer;
use favorites_server::{AppState, app, database};
use serde_json::{Value, json};

async fn server() -> TestServer {
    let pool = database::connect("sqlite::memory:", 1).await.unwrap();
    TestServer::new(app(AppState::from_pool(pool), &["*".to_string()])).unwrap()
}

#[tokio::test]
async fn health_reports_success_and_database() {
    let server = server().await;

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "API is working!");
    assert_eq!(body["database"], "Connected");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn index_lists_endpoints() {
    let server = server().await;

    let body: Value = server.get("/").await.json();

    assert!(body["endpoints"].as_array().unwrap().len() >= 5);
}

#[tokio::test]
async fn add_returns_created_with_trimmed_city() {
    let server = server().await;

    let response = server
        .post("/api/favorites")
        .json(&json!({ "city": "  Tokyo  " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["city"], "Tokyo");
    assert_eq!(body["message"], "Tokyo added to favorites!");
    assert!(body["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn duplicate_add_is_409_with_structured_body() {
    let server = server().await;
    server
        .post("/api/favorites")
        .json(&json!({ "city": "Paris" }))
        .await
        .assert_status(StatusCode::CREATED);

    let response = server
        .post("/api/favorites")
        .json(&json!({ "city": "Paris " }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "City is already in favorites");
    assert_eq!(body["message"], "Paris is already in your favorites!");

    let list: Value = server.get("/api/favorites").await.json();
    assert_eq!(list["count"], 1);
}

#[tokio::test]
async fn invalid_add_bodies_are_400() {
    let server = server().await;

    for body in [json!({ "city": "   " }), json!({ "city": 42 }), json!({})] {
        let response = server.post("/api/favorites").json(&body).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(
            body["error"],
            "City name is required and must be a valid string"
        );
    }

    let response = server.post("/api/favorites").text("Tokyo").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_is_newest_first_with_count() {
    let server = server().await;
    for city in ["Paris", "Tokyo"] {
        server
            .post("/api/favorites")
            .json(&json!({ "city": city }))
            .await;
    }

    let body: Value = server.get("/api/favorites").await.json();

    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["favorites"][0]["city"], "Tokyo");
    assert_eq!(body["favorites"][1]["city"], "Paris");
    assert!(body["favorites"][0]["added_at"].is_string());
}

#[tokio::test]
async fn check_decodes_display_names() {
    let server = server().await;
    server
        .post("/api/favorites")
        .json(&json!({ "city": "Tokyo, JP" }))
        .await;

    let hit: Value = server
        .get("/api/favorites/check/Tokyo%2C%20JP")
        .await
        .json();
    let miss: Value = server.get("/api/favorites/check/Paris").await.json();

    assert_eq!(hit["isFavorite"], true);
    assert_eq!(miss["success"], true);
    assert_eq!(miss["isFavorite"], false);
}

#[tokio::test]
async fn delete_by_id_and_by_name() {
    let server = server().await;
    let created: Value = server
        .post("/api/favorites")
        .json(&json!({ "city": "Oslo" }))
        .await
        .json();
    server
        .post("/api/favorites")
        .json(&json!({ "city": "Rome" }))
        .await;

    let id = created["id"].as_i64().unwrap();
    let response = server.delete(&format!("/api/favorites/{id}")).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["message"],
        "Favorite removed successfully"
    );

    server.delete("/api/favorites/Rome").await.assert_status_ok();

    let list: Value = server.get("/api/favorites").await.json();
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn delete_city_route_only_matches_names() {
    let server = server().await;
    server
        .post("/api/favorites")
        .json(&json!({ "city": "Tokyo, JP" }))
        .await;

    server
        .delete("/api/favorites/city/Tokyo%2C%20JP")
        .await
        .assert_status_ok();
    server
        .delete("/api/favorites/city/Tokyo%2C%20JP")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_missing_is_404_and_leaves_set_unchanged() {
    let server = server().await;
    server
        .post("/api/favorites")
        .json(&json!({ "city": "Paris" }))
        .await;

    for key in ["Berlin", "12345"] {
        let response = server.delete(&format!("/api/favorites/{key}")).await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Favorite not found");
    }

    let list: Value = server.get("/api/favorites").await.json();
    assert_eq!(list["count"], 1);
}

#[tokio::test]
async fn name_route_removes_numeric_city_not_the_row_with_that_id() {
    let server = server().await;
    let paris: Value = server
        .post("/api/favorites")
        .json(&json!({ "city": "Paris" }))
        .await
        .json();
    let numeric: Value = server
        .post("/api/favorites")
        .json(&json!({ "city": paris["id"].to_string() }))
        .await
        .json();
    assert_ne!(paris["id"], numeric["id"]);

    let name = numeric["city"].as_str().unwrap();
    server
        .delete(&format!("/api/favorites/city/{name}"))
        .await
        .assert_status_ok();

    let list: Value = server.get("/api/favorites").await.json();
    assert_eq!(list["count"], 1);
    assert_eq!(list["favorites"][0]["city"], "Paris");
}

#[tokio::test]
async fn undecodable_path_segment_is_400_with_json_body() {
    let server = server().await;

    for response in [
        server.get("/api/favorites/check/%FF").await,
        server.delete("/api/favorites/%FF").await,
        server.delete("/api/favorites/city/%FF").await,
    ] {
        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "City name must be valid UTF-8");
    }
}

#[tokio::test]
async fn unknown_route_is_404_with_json_body() {
    let server = server().await;

    let response = server.get("/api/nope").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Endpoint not found");
}
