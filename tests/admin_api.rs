#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};

#[actix_web::test]
async fn info_page_without_action() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/admin").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], true);
    assert!(body["endpoints"]["stats"].is_string());
    assert_eq!(body["dataStore"]["posts"], 5);
    assert_eq!(body["dataStore"]["profiles"], 35);
}

#[actix_web::test]
async fn stats_partition_profiles_by_status() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/admin?action=stats").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let stats = &body["data"];
    let by_status = ["waitingCount", "medicalCount", "adoptedCount", "communityCount"]
        .iter()
        .map(|key| stats[*key].as_u64().unwrap())
        .sum::<u64>();
    assert_eq!(by_status, stats["profilesCount"].as_u64().unwrap());
    assert_eq!(stats["emergencyCount"], 1);
    assert_eq!(stats["typeBreakdown"]["dogs"], 1);
}

#[actix_web::test]
async fn import_requires_post() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/admin?action=import").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_web::test]
async fn import_rejects_non_object_bodies() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/admin?action=import")
        .set_json(json!([1, 2, 3]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn malformed_import_changes_nothing() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/admin?action=import")
        .set_json(json!({ "posts": [], "profiles": [{ "name": "no id" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.read_store().posts().len(), 5);
    assert_eq!(state.read_store().profiles().len(), 35);
}

#[actix_web::test]
async fn import_replaces_only_present_collections() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/admin?action=import")
        .set_json(json!({ "posts": [] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["postsImported"], 0);
    assert_eq!(body["data"]["profilesImported"], 0);

    let store = state.read_store();
    assert!(store.posts().is_empty());
    assert_eq!(store.profiles().len(), 35);
}

#[actix_web::test]
async fn export_then_import_restores_posts() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/admin?action=export").to_request();
    let exported: Value = test::call_and_read_body_json(&app, req).await;
    let snapshot = &exported["data"];
    assert_eq!(snapshot["posts"].as_array().unwrap().len(), 5);
    assert!(snapshot["exportTime"].is_string());

    let req = test::TestRequest::delete().uri("/api/forum?id=F20250826-001").to_request();
    test::call_service(&app, req).await;
    assert_eq!(state.read_store().posts().len(), 4);

    let req = test::TestRequest::post()
        .uri("/api/admin?action=import")
        .set_json(json!({ "posts": snapshot["posts"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(state.read_store().posts().len(), 5);
}

#[actix_web::test]
async fn reset_needs_confirmation() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/forum")
        .set_json(json!({ "title": "t", "content": "c", "author": "a" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/admin?action=reset").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.read_store().posts().len(), 6);

    let req = test::TestRequest::get().uri("/api/admin?action=reset&confirm=yes").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["posts"], 5);
    assert_eq!(body["data"]["profiles"], 35);

    let store = state.read_store();
    assert!(store.activity_log().is_empty());
    assert_eq!(store.api_call_count(), 0);
}

#[actix_web::test]
async fn unknown_action_falls_back_to_info_page() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/admin?action=shutdown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert!(body["endpoints"].is_object());
    assert_eq!(body["dataStore"]["posts"], 5);
}
