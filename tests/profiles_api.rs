#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use regex::Regex;
use serde_json::{json, Value};

#[actix_web::test]
async fn create_search_delete_round_trip() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/profiles")
        .set_json(json!({ "name": "Test", "type": "猫", "rescueDate": "2025-01-01", "rescueLocation": "X" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["data"]["id"].as_str().unwrap().to_string();
    assert!(Regex::new(r"^A\d{8}-\d+$").unwrap().is_match(&id), "unexpected id {}", id);

    let req = test::TestRequest::get().uri("/api/profiles?search=Test").to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    let profiles = found["data"]["profiles"].as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["id"], id.as_str());

    let req = test::TestRequest::delete().uri(&format!("/api/profiles?id={}", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/profiles?search=Test").to_request();
    let after: Value = test::call_and_read_body_json(&app, req).await;
    assert!(after["data"]["profiles"].as_array().unwrap().is_empty());
    assert_eq!(after["data"]["pagination"]["total"], 0);
}

#[actix_web::test]
async fn create_requires_profile_fields() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/profiles")
        .set_json(json!({ "name": "小花", "type": "猫" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["missingFields"], json!(["rescueDate", "rescueLocation"]));
}

#[actix_web::test]
async fn community_and_status_filters() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::get()
        .uri("/api/profiles?community=%E6%B5%B7%E5%92%8C%E9%99%A2%E5%B0%8F%E5%8C%BA&limit=50")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 32);
    assert_eq!(body["data"]["profiles"].as_array().unwrap().len(), 32);

    let req = test::TestRequest::get().uri("/api/profiles?status=%E7%A4%BE%E5%8C%BA%E7%8C%AB&limit=100").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    for profile in body["data"]["profiles"].as_array().unwrap() {
        assert_eq!(profile["currentStatus"], "社区猫");
    }
}

#[actix_web::test]
async fn status_can_move_backwards_through_update() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::put()
        .uri("/api/profiles?id=A20250826-003")
        .set_json(json!({ "currentStatus": "等待领养" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["currentStatus"], "等待领养");
    assert_eq!(body["data"]["name"], "小白");
    assert!(body["data"]["updateTime"].is_string());
}

#[actix_web::test]
async fn updating_unknown_profile_is_404() {
    let state = common::seeded_state();
    let app = init_app!(state);

    let req = test::TestRequest::put()
        .uri("/api/profiles?id=A00000000-0")
        .set_json(json!({ "name": "ghost" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key("access-control-allow-origin"));
}
