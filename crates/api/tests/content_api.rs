//! Integration tests for the content publishing pipeline over HTTP.
//!
//! The router runs with the in-memory collaborators, so these tests cover
//! the full path from JSON body to dispatcher to store and back without a
//! database.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post, post_json};
use devdocs_events::CONTENT_PUBLISHED;
use serde_json::json;

fn create_payload() -> serde_json::Value {
    json!({
        "topic_id": 1,
        "title": "Ownership Basics",
        "body": "# Ownership\n\nEvery value has a single owner.",
    })
}

// ---------------------------------------------------------------------------
// Create + publish round trip
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_draft_then_publish() {
    let app = common::build_test_app();
    app.topics.add(1);
    let mut rx = app.bus.subscribe();

    // Create: 201, draft, version 1, not yet published.
    let response = post_json(app.router.clone(), "/api/v1/content", create_payload()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["status"], "draft");
    assert_eq!(created["data"]["version"], 1);
    assert!(created["data"]["published_at"].is_null());
    let id = created["data"]["id"].as_i64().unwrap();

    // Published list is empty before publishing.
    let response = get(app.router.clone(), "/api/v1/content/published?topic_id=1").await;
    let list = body_json(response).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);

    // Publish: status flips, version bumps, published_at is set.
    let response = post(app.router.clone(), &format!("/api/v1/content/{id}/publish")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let published = body_json(response).await;
    assert_eq!(published["data"]["status"], "published");
    assert_eq!(published["data"]["version"], 2);
    assert!(published["data"]["published_at"].is_string());

    // Exactly one content.published event on the bus.
    let event = rx.try_recv().expect("publish must emit an event");
    assert_eq!(event.event_type, CONTENT_PUBLISHED);
    assert_eq!(event.source_entity_id, Some(id));
    assert!(rx.try_recv().is_err());

    // Published list now contains the item despite the earlier cached
    // empty list (publishing invalidates the affected keys).
    let response = get(app.router.clone(), "/api/v1/content/published?topic_id=1").await;
    let list = body_json(response).await;
    let items = list["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"].as_i64(), Some(id));
}

#[tokio::test]
async fn publishing_twice_returns_conflict() {
    let app = common::build_test_app();
    app.topics.add(1);
    let mut rx = app.bus.subscribe();

    let response = post_json(app.router.clone(), "/api/v1/content", create_payload()).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post(app.router.clone(), &format!("/api/v1/content/{id}/publish")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post(app.router.clone(), &format!("/api/v1/content/{id}/publish")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let error = body_json(response).await;
    assert_eq!(error["code"], "CONFLICT");

    // Only the first publish emitted an event.
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn publishing_missing_content_returns_404() {
    let app = common::build_test_app();

    let response = post(app.router, "/api/v1/content/999/publish").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Creation validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn invalid_payloads_are_rejected() {
    let app = common::build_test_app();
    app.topics.add(1);

    // Empty title.
    let response = post_json(
        app.router.clone(),
        "/api/v1/content",
        json!({"topic_id": 1, "title": "", "body": "text"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Title over 200 characters.
    let response = post_json(
        app.router.clone(),
        "/api/v1/content",
        json!({"topic_id": 1, "title": "x".repeat(201), "body": "text"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Negative order.
    let response = post_json(
        app.router.clone(),
        "/api/v1/content",
        json!({"topic_id": 1, "title": "t", "body": "text", "order": -1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn creating_under_unknown_topic_returns_404() {
    let app = common::build_test_app();
    // Topic 1 deliberately not registered.

    let response = post_json(app.router.clone(), "/api/v1/content", create_payload()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let error = body_json(response).await;
    assert_eq!(error["code"], "NOT_FOUND");

    // Nothing was written: after the topic appears, its draft list is empty.
    app.topics.add(1);
    let response = get(app.router, "/api/v1/content/by-topic/1?status=draft").await;
    let list = body_json(response).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn content_born_published_has_published_at() {
    let app = common::build_test_app();
    app.topics.add(1);
    let mut rx = app.bus.subscribe();

    let response = post_json(
        app.router.clone(),
        "/api/v1/content",
        json!({"topic_id": 1, "title": "t", "body": "b", "status": "published"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["data"]["status"], "published");
    assert!(created["data"]["published_at"].is_string());

    // Creation raises no events, even for content born published.
    assert!(rx.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_content_embeds_owning_topic() {
    let app = common::build_test_app();
    app.topics.add(1);

    let response = post_json(app.router.clone(), "/api/v1/content", create_payload()).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get(app.router.clone(), &format!("/api/v1/content/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["title"], "Ownership Basics");
    assert_eq!(json["data"]["topic"]["id"].as_i64(), Some(1));

    let response = get(app.router, "/api/v1/content/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn by_topic_listing_filters_on_status() {
    let app = common::build_test_app();
    app.topics.add(1);

    // One draft, one published.
    let response = post_json(app.router.clone(), "/api/v1/content", create_payload()).await;
    let draft_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = post_json(
        app.router.clone(),
        "/api/v1/content",
        json!({"topic_id": 1, "title": "Borrowing", "body": "b"}),
    )
    .await;
    let other_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    let response = post(
        app.router.clone(),
        &format!("/api/v1/content/{other_id}/publish"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Default status is published.
    let response = get(app.router.clone(), "/api/v1/content/by-topic/1").await;
    let list = body_json(response).await;
    let items = list["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"].as_i64(), Some(other_id));

    // Explicit draft listing.
    let response = get(app.router.clone(), "/api/v1/content/by-topic/1?status=draft").await;
    let list = body_json(response).await;
    let items = list["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"].as_i64(), Some(draft_id));

    // Unknown topic: 404, unknown status value: 400.
    let response = get(app.router.clone(), "/api/v1/content/by-topic/42").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let response = get(app.router, "/api/v1/content/by-topic/1?status=bogus").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Unpublish / archive
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unpublish_and_archive_lifecycle() {
    let app = common::build_test_app();
    app.topics.add(1);

    let response = post_json(app.router.clone(), "/api/v1/content", create_payload()).await;
    let id = body_json(response).await["data"]["id"].as_i64().unwrap();

    // Unpublishing a draft is a conflict.
    let response = post(
        app.router.clone(),
        &format!("/api/v1/content/{id}/unpublish"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Publish, then unpublish back to draft.
    let response = post(app.router.clone(), &format!("/api/v1/content/{id}/publish")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = post(
        app.router.clone(),
        &format!("/api/v1/content/{id}/unpublish"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "draft");
    assert!(json["data"]["published_at"].is_null());

    // The published list is empty again.
    let response = get(app.router.clone(), "/api/v1/content/published?topic_id=1").await;
    let list = body_json(response).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 0);

    // Archive, then archiving again conflicts.
    let response = post(app.router.clone(), &format!("/api/v1/content/{id}/archive")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "archived");

    let response = post(app.router, &format!("/api/v1/content/{id}/archive")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}
