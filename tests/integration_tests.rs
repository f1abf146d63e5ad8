//! Integration tests for the ShelterSeek directory API

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use shelterseek::config::ShelterSeekConfig;
use shelterseek::geo::{LocationResolver, ZipDatabase, ZipGeoLookup};
use shelterseek::store::{DirectoryStore, ShelterDraft};
use shelterseek::web::{AppState, router};

fn test_state() -> AppState {
    let db = Arc::new(ZipDatabase::bundled().expect("bundled dataset"));
    let resolver = LocationResolver::new(ZipGeoLookup::new(db));
    AppState {
        config: Arc::new(ShelterSeekConfig::default()),
        store: Arc::new(DirectoryStore::new(resolver)),
    }
}

/// Two shelters around Auburn, AL, mirroring a typical seeded directory
fn seed_auburn_shelters(state: &AppState) {
    state
        .store
        .create_shelter(ShelterDraft {
            name: "Test Shelter 1".to_string(),
            street_addr: "234 Test Street".to_string(),
            city: "Auburn".to_string(),
            state: "AL".to_string(),
            zip: "36832".to_string(),
            max_capacity: 15,
            photo: "https://example.com/shelter1.jpg".to_string(),
            owner: "NotHunter".to_string(),
        })
        .expect("seed shelter 1");
    state
        .store
        .create_shelter(ShelterDraft {
            name: "Test Shelter 2".to_string(),
            street_addr: "123 Test Street".to_string(),
            city: "Auburn University".to_string(),
            state: "AL".to_string(),
            zip: "36849".to_string(),
            max_capacity: 2500,
            photo: "https://example.com/shelter2.jpg".to_string(),
            owner: "Hunter".to_string(),
        })
        .expect("seed shelter 2");
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .expect("request"),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    // Extractor rejections come back as plain text, not JSON
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn valid_shelter_payload() -> Value {
    json!({
        "name": "Lee County Humane Society",
        "street_address": "1140 Ware Drive",
        "city": "Auburn",
        "state": "AL",
        "zip": "36830",
        "max_capacity": 120,
        "photo_url": "https://example.com/shelter.jpg"
    })
}

#[tokio::test]
async fn splash_reports_defaults() {
    let app = router(test_state());

    let (status, body) = send(&app, "GET", "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "shelterseek");
    assert_eq!(body["default_zip"], "36830");
    assert_eq!(body["default_radius_miles"], 10);
}

#[tokio::test]
async fn index_returns_shelters_in_radius() {
    let state = test_state();
    seed_auburn_shelters(&state);
    let app = router(state);

    let (status, body) = send(&app, "GET", "/shelters?zip=36830&radius=5", None).await;

    assert_eq!(status, StatusCode::OK);
    let listings = body.as_array().expect("array of locations");
    assert_eq!(listings.len(), 2);

    let cities: Vec<&str> = listings
        .iter()
        .map(|entry| entry["location"]["city"].as_str().expect("city"))
        .collect();
    assert!(cities.contains(&"Auburn"));
    assert!(cities.contains(&"Auburn University"));

    let auburn = listings
        .iter()
        .find(|entry| entry["location"]["city"] == "Auburn")
        .expect("Auburn listing");
    assert_eq!(auburn["shelters"][0]["name"], "Test Shelter 1");
}

#[tokio::test]
async fn index_defaults_to_configured_zip_and_radius() {
    let state = test_state();
    seed_auburn_shelters(&state);
    let app = router(state);

    let (status, body) = send(&app, "GET", "/shelters", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body.as_array().expect("array").is_empty());
}

#[tokio::test]
async fn index_with_unmatched_area_is_not_found() {
    let state = test_state();
    seed_auburn_shelters(&state);
    let app = router(state);

    // Carrabelle, FL is a real ZIP with no stored locations nearby
    let (status, body) = send(&app, "GET", "/shelters?zip=32323&radius=10", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .contains("don't have your location")
    );
}

#[tokio::test]
async fn index_rejects_unreal_zip() {
    let app = router(test_state());

    let (status, body) = send(&app, "GET", "/shelters?zip=00000&radius=10", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .contains("Invalid ZIP")
    );
}

#[tokio::test]
async fn index_rejects_malformed_zip() {
    let app = router(test_state());

    let (status, _) = send(&app, "GET", "/shelters?zip=abcde&radius=10", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn index_rejects_out_of_range_radius() {
    let app = router(test_state());

    for radius in ["0", "51", "ten"] {
        let uri = format!("/shelters?zip=36830&radius={radius}");
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "radius {radius}");
    }
}

#[tokio::test]
async fn shelter_create_and_show_round_trip() {
    let app = router(test_state());

    let (status, created) =
        send(&app, "POST", "/shelters", Some(valid_shelter_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Lee County Humane Society");
    assert_eq!(created["current_capacity"], 0);

    let id = created["id"].as_u64().expect("shelter id");
    let (status, detail) = send(&app, "GET", &format!("/shelters/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["shelter"]["name"], "Lee County Humane Society");
    assert_eq!(detail["comments"], json!([]));
}

#[tokio::test]
async fn shelter_create_rejects_mismatched_location() {
    let app = router(test_state());

    let mut payload = valid_shelter_payload();
    payload["state"] = json!("CO");
    let (status, body) = send(&app, "POST", "/shelters", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .contains("do not match")
    );
}

#[tokio::test]
async fn shelter_create_rejects_invalid_form() {
    let app = router(test_state());

    let mut payload = valid_shelter_payload();
    payload["name"] = json!("");
    let (status, body) = send(&app, "POST", "/shelters", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        body["error"]
            .as_str()
            .expect("error message")
            .contains("Shelter name")
    );
}

#[tokio::test]
async fn shelter_update_changes_listing() {
    let app = router(test_state());

    let (_, created) = send(&app, "POST", "/shelters", Some(valid_shelter_payload())).await;
    let id = created["id"].as_u64().expect("shelter id");

    let mut payload = valid_shelter_payload();
    payload["name"] = json!("Renamed Shelter");
    let (status, updated) =
        send(&app, "PUT", &format!("/shelters/{id}"), Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Renamed Shelter");
    assert_eq!(updated["owner"], created["owner"]);
}

#[tokio::test]
async fn shelter_update_missing_id_is_not_found() {
    let app = router(test_state());

    let (status, _) = send(
        &app,
        "PUT",
        "/shelters/999",
        Some(valid_shelter_payload()),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shelter_delete_removes_listing() {
    let app = router(test_state());

    let (_, created) = send(&app, "POST", "/shelters", Some(valid_shelter_payload())).await;
    let id = created["id"].as_u64().expect("shelter id");

    let (status, _) = send(&app, "DELETE", &format!("/shelters/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/shelters/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shelter_non_numeric_id_is_client_error() {
    let app = router(test_state());

    let (status, _) = send(&app, "GET", "/shelters/abc", None).await;

    assert!(status.is_client_error());
}

#[tokio::test]
async fn comment_crud_round_trip() {
    let app = router(test_state());

    let (_, created) = send(&app, "POST", "/shelters", Some(valid_shelter_payload())).await;
    let id = created["id"].as_u64().expect("shelter id");

    let (status, comment) = send(
        &app,
        "POST",
        &format!("/shelters/{id}/comments"),
        Some(json!({"author": "Hunter", "content": "Great staff."})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(comment["author"], "Hunter");
    let comment_id = comment["id"].as_u64().expect("comment id");

    let (status, comments) =
        send(&app, "GET", &format!("/shelters/{id}/comments"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comments.as_array().expect("comments").len(), 1);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/shelters/{id}/comments/{comment_id}"),
        Some(json!({"content": "Even better on a second visit."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["content"], "Even better on a second visit.");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/shelters/{id}/comments/{comment_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, comments) = send(&app, "GET", &format!("/shelters/{id}/comments"), None).await;
    assert_eq!(comments, json!([]));
}

#[tokio::test]
async fn comment_on_missing_shelter_is_not_found() {
    let app = router(test_state());

    let (status, _) = send(
        &app,
        "POST",
        "/shelters/42/comments",
        Some(json!({"content": "Hello"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comment_under_wrong_shelter_is_not_found() {
    let app = router(test_state());

    let (_, first) = send(&app, "POST", "/shelters", Some(valid_shelter_payload())).await;
    let first_id = first["id"].as_u64().expect("shelter id");

    let mut payload = valid_shelter_payload();
    payload["name"] = json!("Second Shelter");
    let (_, second) = send(&app, "POST", "/shelters", Some(payload)).await;
    let second_id = second["id"].as_u64().expect("shelter id");

    let (_, comment) = send(
        &app,
        "POST",
        &format!("/shelters/{first_id}/comments"),
        Some(json!({"content": "On the first shelter"})),
    )
    .await;
    let comment_id = comment["id"].as_u64().expect("comment id");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/shelters/{second_id}/comments/{comment_id}"),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
