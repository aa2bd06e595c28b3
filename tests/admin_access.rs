mod common;

use base64::{engine::general_purpose, Engine as _};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_identity(app: &common::TestApp, token: &str, email: &str) {
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": email })))
        .mount(&app.identity)
        .await;
}

fn project_payload() -> Value {
    json!({
        "title": "Alpha",
        "description": "A portfolio piece",
        "technologies": ["Rust", "Actix"],
        "featured": true,
        "media": {
            "data": general_purpose::STANDARD.encode(b"fake-png"),
            "kind": "image"
        }
    })
}

#[tokio::test]
async fn anonymous_visitors_cannot_create_content() {
    let app = common::spawn_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/projects", app.address))
        .json(&project_payload())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 401);
    assert!(app.record_store.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn verified_non_admins_are_turned_away() {
    let app = common::spawn_app().await;
    mount_identity(&app, "visitor-token", "visitor@example.com").await;

    let response = reqwest::Client::new()
        .post(format!("{}/projects", app.address))
        .bearer_auth("visitor-token")
        .json(&project_payload())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 403);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Access denied. You are not an admin.");
}

#[tokio::test]
async fn the_admin_creates_a_project_end_to_end() {
    let app = common::spawn_app().await;
    mount_identity(&app, "admin-token", common::ADMIN_IDENTITY).await;

    Mock::given(method("POST"))
        .and(path("/folio/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://assets.example.com/image/one.png",
            "public_id": "folio/one"
        })))
        .expect(1)
        .mount(&app.asset_store)
        .await;

    // the record arrives with the asset reference already attached
    Mock::given(method("POST"))
        .and(path("/projects.json"))
        .and(body_partial_json(json!({
            "title": "Alpha",
            "imageUrl": "https://assets.example.com/image/one.png",
            "imagePublicId": "folio/one"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "-NAbc123" })))
        .expect(1)
        .mount(&app.record_store)
        .await;

    let response = reqwest::Client::new()
        .post(format!("{}/projects", app.address))
        .bearer_auth("admin-token")
        .json(&project_payload())
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], "-NAbc123");
}

#[tokio::test]
async fn a_malformed_body_names_the_offending_field() {
    let app = common::spawn_app().await;
    mount_identity(&app, "admin-token", common::ADMIN_IDENTITY).await;

    let response = reqwest::Client::new()
        .post(format!("{}/projects", app.address))
        .bearer_auth("admin-token")
        .json(&json!({ "title": "Alpha" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn listing_projects_needs_no_credentials() {
    let app = common::spawn_app().await;
    Mock::given(method("GET"))
        .and(path("/projects.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .mount(&app.record_store)
        .await;

    let response = reqwest::Client::new()
        .get(format!("{}/projects", app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["list"], json!([]));
}
