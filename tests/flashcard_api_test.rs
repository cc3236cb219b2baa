mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::{Value, json};

async fn create_set(app: &axum::Router, user: &str, name: &str) -> String {
    let (status, body) =
        post(app, "/flashcard/set", json!({ "user_id": user, "name": name })).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["payload"]["id"].as_str().unwrap().to_string()
}

async fn create_card(app: &axum::Router, set: &str, front: &str, back: &str) -> Value {
    let (status, body) = post(
        app,
        "/flashcard/card",
        json!({ "set_id": set, "front": front, "back": back }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["payload"].clone()
}

#[tokio::test]
async fn set_with_cards_in_creation_order() {
    let (app, _pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;
    let set = create_set(&app, &user, "Biology").await;
    create_card(&app, &set, "Mitochondria", "Powerhouse of the cell").await;
    create_card(&app, &set, "Ribosome", "Protein synthesis").await;

    let (status, body) = get(&app, &format!("/flashcard/set/{set}/cards")).await;
    assert_eq!(status, StatusCode::OK);
    assert_envelope(&body, StatusCode::OK, "Flashcard set retrieved with cards successfully");

    let payload = &body["payload"];
    assert_eq!(payload["id"], set.as_str());
    assert_eq!(payload["name"], "Biology");
    let cards = payload["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0]["front"], "Mitochondria");
    assert_eq!(cards[1]["front"], "Ribosome");
}

#[tokio::test]
async fn set_listing_counts_cards() {
    let (app, _pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;
    let empty = create_set(&app, &user, "Empty").await;
    let full = create_set(&app, &user, "Full").await;
    create_card(&app, &full, "a", "1").await;
    create_card(&app, &full, "b", "2").await;
    create_card(&app, &full, "c", "3").await;

    let (status, body) = get(&app, &format!("/flashcard/set/user/{user}")).await;
    assert_eq!(status, StatusCode::OK);
    let sets = body["payload"].as_array().unwrap();
    assert_eq!(sets.len(), 2);
    // adding cards touched "Full", so it sorts first
    assert_eq!(sets[0]["id"], full.as_str());
    assert_eq!(sets[0]["card_count"], 3);
    assert_eq!(sets[1]["id"], empty.as_str());
    assert_eq!(sets[1]["card_count"], 0);
}

#[tokio::test]
async fn set_validation_and_updates() {
    let (app, _pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;

    let (status, body) = post(&app, "/flashcard/set", json!({ "user_id": user })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Set name is required");

    let (status, body) = post(&app, "/flashcard/set", json!({ "name": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User ID is required");

    let (_, body) = post(
        &app,
        "/flashcard/set",
        json!({ "user_id": user, "name": "Chem", "description": "organic" }),
    )
    .await;
    let set = body["payload"]["id"].as_str().unwrap().to_string();

    let (status, body) =
        put(&app, &format!("/flashcard/set/{set}"), json!({ "name": "Chemistry" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["name"], "Chemistry");
    assert_eq!(body["payload"]["description"], "organic");

    let (status, body) = put(&app, &format!("/flashcard/set/{set}"), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Set name is required");

    let (status, body) =
        put(&app, "/flashcard/set/missing", json!({ "name": "Chemistry" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Flashcard set not found");
}

#[tokio::test]
async fn card_crud() {
    let (app, _pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;
    let set = create_set(&app, &user, "Spanish").await;

    let (status, body) =
        post(&app, "/flashcard/card", json!({ "set_id": set, "front": "hola" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Front and back content are required");

    let (status, body) = post(
        &app,
        "/flashcard/card",
        json!({ "set_id": "missing", "front": "hola", "back": "hello" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Flashcard set not found");

    let card = create_card(&app, &set, "hola", "hi").await;
    let id = card["id"].as_str().unwrap().to_string();

    let (status, body) = put(
        &app,
        &format!("/flashcard/card/{id}"),
        json!({ "front": "hola", "back": "hello" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"]["back"], "hello");

    let (status, body) = get(&app, &format!("/flashcard/cards/set/{set}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payload"].as_array().unwrap().len(), 1);

    let (status, body) = delete(&app, &format!("/flashcard/card/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Flashcard deleted successfully");

    let (status, body) = get(&app, &format!("/flashcard/card/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Flashcard not found");
}

#[tokio::test]
async fn deleting_set_removes_its_cards() {
    let (app, pool) = test_app().await;
    let user = register(&app, "Ann", "ann@x.com").await;
    let set = create_set(&app, &user, "History").await;
    create_card(&app, &set, "1066", "Hastings").await;

    let (status, body) = delete(&app, &format!("/flashcard/set/{set}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Flashcard set deleted successfully");

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM flashcards")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let (status, _) = get(&app, &format!("/flashcard/set/{set}/cards")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
