mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn create_card_applies_defaults() {
    let (app, _pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;

    let (status, body) = post(
        &app,
        "/card",
        json!({ "title": "Read chapter 4", "user_id": user, "deadline": "2099-01-01T09:00:00Z" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_envelope(&body, StatusCode::CREATED, "Card created successfully");
    let card = &body["payload"];
    assert_eq!(card["status"], "belum selesai");
    assert_eq!(card["description"], "");
    assert_eq!(card["user_id"], user.as_str());
    assert_eq!(card["is_overdue"], false);
}

#[tokio::test]
async fn create_card_requires_title_and_user() {
    let (app, _pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;

    let (status, body) = post(&app, "/card", json!({ "user_id": user })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title is required");

    let (status, body) = post(&app, "/card", json!({ "title": "Essay" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User ID is required");

    let (status, body) =
        post(&app, "/card", json!({ "title": "Essay", "user_id": user, "deadline": "soon" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid deadline format");
}

#[tokio::test]
async fn invalid_status_rejected_on_create_and_update() {
    let (app, pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;
    let invalid = "Invalid status value. Must be 'sudah selesai' or 'belum selesai'";

    let (status, body) =
        post(&app, "/card", json!({ "title": "Essay", "user_id": user, "status": "selesai" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], invalid);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cards")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);

    let (_, body) = post(&app, "/card", json!({ "title": "Essay", "user_id": user })).await;
    let id = body["payload"]["id"].as_str().unwrap().to_string();

    let (status, body) = put(&app, &format!("/card/{id}"), json!({ "status": "selesai" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], invalid);

    let (_, body) = get(&app, &format!("/card/{id}")).await;
    assert_eq!(body["payload"]["status"], "belum selesai");
}

#[tokio::test]
async fn update_merges_fields_and_completes() {
    let (app, _pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;
    let (_, body) = post(
        &app,
        "/card",
        json!({
            "title": "Essay",
            "description": "outline first",
            "deadline": "2099-03-01T00:00:00Z",
            "user_id": user
        }),
    )
    .await;
    let id = body["payload"]["id"].as_str().unwrap().to_string();

    let (status, body) =
        put(&app, &format!("/card/{id}"), json!({ "status": "sudah selesai" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, StatusCode::OK, "Card updated successfully");
    let card = &body["payload"];
    assert_eq!(card["status"], "sudah selesai");
    assert_eq!(card["title"], "Essay");
    assert_eq!(card["description"], "outline first");
    assert!(card["deadline"].as_str().unwrap().starts_with("2099-03-01"));

    let (status, body) = put(&app, &format!("/card/{id}"), json!({ "description": "" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["description"], "outline first");

    let (status, body) = put(&app, &format!("/card/{id}"), json!({ "title": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Title is required");
}

#[tokio::test]
async fn completed_card_cannot_be_reopened() {
    let (app, _pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;
    let (_, body) = post(
        &app,
        "/card",
        json!({ "title": "Essay", "user_id": user, "status": "sudah selesai" }),
    )
    .await;
    let id = body["payload"]["id"].as_str().unwrap().to_string();

    let (status, body) =
        put(&app, &format!("/card/{id}"), json!({ "status": "belum selesai" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Completed cards cannot be reopened");

    // deletion is allowed in either state
    let (status, body) = delete(&app, &format!("/card/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Card deleted successfully");
}

#[tokio::test]
async fn overdue_is_computed_not_persisted() {
    let (app, _pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;
    let (_, body) = post(
        &app,
        "/card",
        json!({ "title": "Old essay", "user_id": user, "deadline": "2001-01-01" }),
    )
    .await;
    let card = &body["payload"];
    assert_eq!(card["is_overdue"], true);
    assert_eq!(card["status"], "belum selesai");
}

#[tokio::test]
async fn lists_cards_newest_first() {
    let (app, _pool) = test_app().await;
    let ann = register(&app, "Ann", "ann@x.com").await;
    let bob = register(&app, "Bob", "bob@x.com").await;

    for title in ["first", "second", "third"] {
        post(&app, "/card", json!({ "title": title, "user_id": ann })).await;
    }
    post(&app, "/card", json!({ "title": "bob's", "user_id": bob })).await;

    let (status, body) = get(&app, &format!("/card/user/{ann}")).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<&str> = body["payload"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn missing_cards_are_not_found() {
    let (app, _pool) = test_app().await;

    let (status, body) = get(&app, "/card/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_envelope(&body, StatusCode::NOT_FOUND, "Card not found");

    let (status, _) = put(&app, "/card/does-not-exist", json!({ "title": "x" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, "/card/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_uses_envelope() {
    let (app, _pool) = test_app().await;
    let (status, body) = send(
        &app,
        axum::http::Method::POST,
        "/card",
        Some(json!("just a string")),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));
}
