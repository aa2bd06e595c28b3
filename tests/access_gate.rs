mod common;

use folio::services::gate::NOT_ADMIN_MESSAGE;
use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_settings(app: &common::TestApp, body: Value) {
    Mock::given(method("GET"))
        .and(path("/settings.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&app.record_store)
        .await;
}

async fn mount_identity(app: &common::TestApp, token: &str, email: &str) {
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", format!("Bearer {}", token).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "email": email })))
        .mount(&app.identity)
        .await;
}

async fn gate_status(app: &common::TestApp, token: Option<&str>) -> Value {
    let client = reqwest::Client::new();
    let mut request = client.get(format!("{}/gate", app.address));
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    let response = request.send().await.expect("Failed to execute request.");
    assert!(response.status().is_success());
    response.json().await.expect("gate status body")
}

#[tokio::test]
async fn gate_is_open_when_maintenance_is_off() {
    let app = common::spawn_app().await;
    mount_settings(&app, json!({ "maintenanceMode": false })).await;

    let body = gate_status(&app, None).await;
    assert_eq!(body["item"]["state"], "open");
    assert!(body["item"]["message"].is_null());
}

#[tokio::test]
async fn admin_passes_through_during_maintenance() {
    let app = common::spawn_app().await;
    mount_settings(&app, json!({ "maintenanceMode": true })).await;
    mount_identity(&app, "admin-token", common::ADMIN_IDENTITY).await;

    let body = gate_status(&app, Some("admin-token")).await;
    assert_eq!(body["item"]["state"], "maintenance_admin_override");
}

#[tokio::test]
async fn verified_non_admin_gets_the_distinct_notice() {
    let app = common::spawn_app().await;
    mount_settings(
        &app,
        json!({ "maintenanceMode": true, "maintenanceMessage": "Be right back." }),
    )
    .await;
    mount_identity(&app, "visitor-token", "visitor@example.com").await;

    let body = gate_status(&app, Some("visitor-token")).await;
    assert_eq!(body["item"]["state"], "maintenance_blocked");
    assert_eq!(body["item"]["message"], NOT_ADMIN_MESSAGE);
}

#[tokio::test]
async fn anonymous_visitor_sees_the_configured_message() {
    let app = common::spawn_app().await;
    mount_settings(
        &app,
        json!({
            "maintenanceMode": true,
            "maintenanceMessage": "Be right back.",
            "maintenanceEndTime": "2026-09-01T10:00:00Z"
        }),
    )
    .await;

    let body = gate_status(&app, None).await;
    assert_eq!(body["item"]["state"], "maintenance_blocked");
    assert_eq!(body["item"]["message"], "Be right back.");
    assert_eq!(body["item"]["maintenanceEndTime"], "2026-09-01T10:00:00Z");
}

#[tokio::test]
async fn rejected_token_is_treated_as_anonymous() {
    let app = common::spawn_app().await;
    mount_settings(&app, json!({ "maintenanceMode": true })).await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&app.identity)
        .await;

    let body = gate_status(&app, Some("stale-token")).await;
    assert_eq!(body["item"]["state"], "maintenance_blocked");
}
