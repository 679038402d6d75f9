use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::common::{Learner, TestClient, TestStateBuilder, cards, create_card, db, uuid_at};

#[tokio::test]
async fn test_create_statement_flashcard() {
    let state = require_db!(TestStateBuilder::new());
    let client = TestClient::new(&state);
    let learner = Learner::create(&state, false).await;

    let mut body = cards::statement("The borrow checker runs at compile time", true);
    body["explanation"] = json!("It is part of type checking");
    body["tags"] = json!(["Rust", "  rust ", "Compiler"]);

    let card = create_card(&client, &learner, &body).await;

    assert_eq!(card["question_type"], "statement");
    assert_eq!(card["is_true"], true);
    assert_eq!(card["difficulty"], "easy");
    assert_eq!(card["status"], "published");
    assert!(card["eligible_at"].is_null());
    assert_eq!(card["answers"], json!([]));
    // Tags are normalised and deduplicated
    assert_eq!(card["tags"], json!(["compiler", "rust"]));

    learner.cleanup(&state).await;
}

#[tokio::test]
async fn test_create_choice_flashcard_infers_type() {
    let state = require_db!(TestStateBuilder::new());
    let client = TestClient::new(&state);
    let learner = Learner::create(&state, false).await;

    let single = create_card(&client, &learner, &cards::choice("One", [false, true, false])).await;
    assert_eq!(single["question_type"], "single");
    assert!(single["is_true"].is_null());

    let answers = single["answers"].as_array().unwrap();
    assert_eq!(answers.len(), 3);
    assert_eq!(answers[0]["text"], "a");
    assert_eq!(answers[1]["is_correct"], true);

    let multiple =
        create_card(&client, &learner, &cards::choice("Two", [true, false, true])).await;
    assert_eq!(multiple["question_type"], "multiple");

    // An explicit multiple with one correct answer is kept as multiple
    let mut explicit = cards::choice("Explicit", [true, false, false]);
    explicit["question_type"] = json!("multiple");
    let explicit = create_card(&client, &learner, &explicit).await;
    assert_eq!(explicit["question_type"], "multiple");

    learner.cleanup(&state).await;
}

#[tokio::test]
async fn test_get_flashcard_is_owner_only() {
    let state = require_db!(TestStateBuilder::new());
    let client = TestClient::new(&state);
    let owner = Learner::create(&state, false).await;
    let stranger = Learner::create(&state, false).await;

    let mut body = cards::statement("Owned", false);
    body["tags"] = json!(["ownership"]);
    let card = create_card(&client, &owner, &body).await;
    let uri = format!("/flashcards/{}", uuid_at(&card["id"]));

    let response = client.get_with_auth(&uri, &owner.token).await;
    response.assert_status(StatusCode::OK);
    let fetched: Value = response.json();
    assert_eq!(fetched["id"], card["id"]);
    assert_eq!(fetched["tags"], json!(["ownership"]));

    let response = client.get_with_auth(&uri, &stranger.token).await;
    response.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "not_found");

    owner.cleanup(&state).await;
    stranger.cleanup(&state).await;
}

#[tokio::test]
async fn test_free_account_limit() {
    let state = require_db!(TestStateBuilder::new().with("FREE_FLASHCARD_LIMIT", 2));
    let client = TestClient::new(&state);
    let free = Learner::create(&state, false).await;
    let premium = Learner::create(&state, true).await;

    for learner in [&free, &premium] {
        create_card(&client, learner, &cards::statement("First", true)).await;
        create_card(&client, learner, &cards::statement("Second", true)).await;
    }

    let response = client
        .post_json_with_auth("/flashcards", &cards::statement("Third", true), &free.token)
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "forbidden");

    // Premium accounts are not limited
    create_card(&client, &premium, &cards::statement("Third", true)).await;

    free.cleanup(&state).await;
    premium.cleanup(&state).await;
}

#[tokio::test]
async fn test_free_limit_holds_under_concurrent_creates() {
    let state = require_db!(TestStateBuilder::new().with("FREE_FLASHCARD_LIMIT", 1));
    let client = TestClient::new(&state);
    let free = Learner::create(&state, false).await;

    let create = |text: &'static str| {
        let body = cards::statement(text, true);
        let (client, token) = (&client, &free.token);
        async move { client.post_json_with_auth("/flashcards", &body, token).await }
    };
    let (one, two, three, four) = tokio::join!(
        create("One"),
        create("Two"),
        create("Three"),
        create("Four")
    );
    let statuses = [one, two, three, four].map(|response| response.status);

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let refused = statuses.iter().filter(|s| **s == StatusCode::FORBIDDEN).count();
    assert_eq!((created, refused), (1, 3), "{statuses:?}");

    free.cleanup(&state).await;
}

#[tokio::test]
async fn test_update_status() {
    let state = require_db!(TestStateBuilder::new());
    let client = TestClient::new(&state);
    let learner = Learner::create(&state, false).await;

    let mut body = cards::statement("Work in progress", true);
    body["status"] = json!("draft");
    let card = create_card(&client, &learner, &body).await;
    assert_eq!(card["status"], "draft");

    let uri = format!("/flashcards/{}/status", uuid_at(&card["id"]));
    let response = client
        .patch_json_with_auth(&uri, &json!({ "status": "hidden" }), &learner.token)
        .await;
    response.assert_status(StatusCode::OK);
    let updated: Value = response.json();
    assert_eq!(updated["status"], "hidden");

    let response = client
        .patch_json_with_auth(&uri, &json!({ "status": "archived" }), &learner.token)
        .await;
    assert!(response.status.is_client_error());

    learner.cleanup(&state).await;
}

#[tokio::test]
async fn test_revive_buried_flashcard() {
    let state = require_db!(TestStateBuilder::new());
    let client = TestClient::new(&state);
    let learner = Learner::create(&state, false).await;

    let card = create_card(&client, &learner, &cards::statement("Retired", true)).await;
    let id = uuid_at(&card["id"]);
    let uri = format!("/flashcards/{id}/revive");

    // Live cards cannot be revived
    let response = client.post_with_auth(&uri, &learner.token).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "validation_error");

    db::set_difficulty(&state.pool, id, "buried").await.unwrap();

    let response = client.post_with_auth(&uri, &learner.token).await;
    response.assert_status(StatusCode::OK);
    let revived: Value = response.json();
    assert_eq!(revived["difficulty"], "easy");
    assert!(revived["eligible_at"].is_null());

    learner.cleanup(&state).await;
}

#[tokio::test]
async fn test_revive_unknown_flashcard() {
    let state = require_db!(TestStateBuilder::new());
    let client = TestClient::new(&state);
    let learner = Learner::create(&state, false).await;

    let response = client
        .post_with_auth(
            &format!("/flashcards/{}/revive", uuid::Uuid::new_v4()),
            &learner.token,
        )
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    learner.cleanup(&state).await;
}
