mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use common::{get_request, multipart_request, send, send_raw, test_app};
use mefit::services::PLACEHOLDER_IMAGE;

fn profile_payload() -> Value {
    json!({
        "weight": 68.0,
        "height": 171.5,
        "age": 27,
        "fitnessLevel": "intermediate",
        "trainingFrequency": "weekly",
        "contributorRequest": false
    })
}

async fn create_profile(app: &axum::Router) -> i64 {
    let (status, profile) = send(app, Method::POST, "/api/v1/profiles", Some(profile_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    profile["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_profile_crud_cycle() {
    let (app, _) = test_app().await;
    let id = create_profile(&app).await;
    let uri = format!("/api/v1/profiles/{}", id);

    let (status, profile) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["fitnessLevel"], "intermediate");
    assert_eq!(profile["hasPicture"], false);
    assert!(profile.get("picture").is_none());

    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "weight": 70.5,
            "height": 172.0,
            "age": 28,
            "fitnessLevel": "ADVANCED",
            "trainingFrequency": "daily",
            "contributorRequest": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["weight"], 70.5);
    assert_eq!(updated["height"], 172.0);
    assert_eq!(updated["age"], 28);
    assert_eq!(updated["fitnessLevel"], "ADVANCED");
    assert_eq!(updated["trainingFrequency"], "daily");
    assert_eq!(updated["contributorRequest"], true);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, error) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "PROFILE_NOT_FOUND");
}

#[tokio::test]
async fn test_profile_validation_and_missing_ids() {
    let (app, _) = test_app().await;

    let mut payload = profile_payload();
    payload["fitnessLevel"] = json!("");
    let (status, _) = send(&app, Method::POST, "/api/v1/profiles", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut payload = profile_payload();
    payload["weight"] = json!(-68.0);
    let (status, error) = send(&app, Method::POST, "/api/v1/profiles", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/v1/profiles/77",
        Some(profile_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/profiles/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_profile_fields_are_stored_as_sent() {
    let (app, _) = test_app().await;

    let mut payload = profile_payload();
    payload["age"] = json!(10);
    payload["fitnessLevel"] = json!("Advanced");
    payload["trainingFrequency"] = json!("2x per week");
    let (status, created) = send(&app, Method::POST, "/api/v1/profiles", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["age"], 10);
    assert_eq!(created["fitnessLevel"], "Advanced");
    assert_eq!(created["trainingFrequency"], "2x per week");

    let uri = format!("/api/v1/profiles/{}", created["id"]);
    let (_, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(fetched["fitnessLevel"], "Advanced");
    assert_eq!(fetched["trainingFrequency"], "2x per week");
}

#[tokio::test]
async fn test_delete_all_profiles() {
    let (app, _) = test_app().await;
    create_profile(&app).await;
    create_profile(&app).await;

    let (status, _) = send(&app, Method::DELETE, "/api/v1/profiles", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, profiles) = send(&app, Method::GET, "/api/v1/profiles", None).await;
    assert_eq!(profiles, json!([]));
}

#[tokio::test]
async fn test_picture_placeholder_until_upload() {
    let (app, _) = test_app().await;
    let id = create_profile(&app).await;
    let picture_uri = format!("/api/v1/profiles/{}/picture", id);

    let (status, content_type, bytes) = send_raw(&app, get_request(&picture_uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some("image/jpeg"));
    assert_eq!(bytes, PLACEHOLDER_IMAGE.to_vec());

    let (_, _, unknown) = send_raw(&app, get_request("/api/v1/profiles/9999/picture")).await;
    assert_eq!(unknown, PLACEHOLDER_IMAGE.to_vec());

    let jpeg: Vec<u8> = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46];
    let (status, _, body) = send_raw(&app, multipart_request(&picture_uri, "file", &jpeg)).await;
    assert_eq!(status, StatusCode::OK);
    let profile: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(profile["hasPicture"], true);

    let (_, _, bytes) = send_raw(&app, get_request(&picture_uri)).await;
    assert_eq!(bytes, jpeg);
}

#[tokio::test]
async fn test_picture_upload_errors_are_reported() {
    let (app, _) = test_app().await;
    let id = create_profile(&app).await;
    let picture_uri = format!("/api/v1/profiles/{}/picture", id);

    // Wrong field name
    let (status, _, _) = send_raw(&app, multipart_request(&picture_uri, "avatar", &[1, 2, 3])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Empty file
    let (status, _, _) = send_raw(&app, multipart_request(&picture_uri, "file", &[])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Not multipart at all
    let request = Request::builder()
        .method(Method::POST)
        .uri(&picture_uri)
        .header("Content-Type", "application/json")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _, _) = send_raw(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown profile
    let (status, _, _) = send_raw(
        &app,
        multipart_request("/api/v1/profiles/555/picture", "file", &[1, 2, 3]),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // None of the failures stored anything
    let (_, _, bytes) = send_raw(&app, get_request(&picture_uri)).await;
    assert_eq!(bytes, PLACEHOLDER_IMAGE.to_vec());
}

#[tokio::test]
async fn test_oversized_picture_is_rejected() {
    let (app, _) = test_app().await;
    let id = create_profile(&app).await;
    let picture_uri = format!("/api/v1/profiles/{}/picture", id);

    // test_config caps uploads at 1 KiB
    let (status, _, body) = send_raw(&app, multipart_request(&picture_uri, "file", &vec![7u8; 4096])).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "PAYLOAD_TOO_LARGE");
    let (_, _, bytes) = send_raw(&app, get_request(&picture_uri)).await;
    assert_eq!(bytes, PLACEHOLDER_IMAGE.to_vec());
}
