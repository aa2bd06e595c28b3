use folio::configuration::{
    AssetStoreSettings, EmailSettings, IdentitySettings, RecordStoreSettings,
};
use folio::connectors::{
    AssetStoreClient, AssetStoreConnector, ConnectorError, EmailClient, EmailConnector,
    IdentityClient, IdentityConnector, RecordStoreClient, RecordStoreConnector,
};
use folio::forms::ContactForm;
use folio::models::{AssetFile, AssetKind};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record_client(server: &MockServer, auth_token: Option<&str>) -> RecordStoreClient {
    RecordStoreClient::new(&RecordStoreSettings {
        base_url: server.uri(),
        auth_token: auth_token.map(str::to_string),
        timeout_secs: 5,
    })
    .unwrap()
}

fn asset_client(server: &MockServer) -> AssetStoreClient {
    AssetStoreClient::new(&AssetStoreSettings {
        base_url: server.uri(),
        cloud_name: "folio".to_string(),
        upload_preset: "folio_unsigned".to_string(),
        timeout_secs: 5,
    })
    .unwrap()
}

fn sample_image() -> AssetFile {
    AssetFile {
        bytes: b"fake-image".to_vec(),
        kind: AssetKind::Image,
    }
}

#[tokio::test]
async fn create_returns_the_store_generated_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/projects.json"))
        .and(body_partial_json(json!({ "title": "Alpha" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "-NAbc123" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = record_client(&server, None);
    let id = client
        .create("projects", json!({ "title": "Alpha" }))
        .await
        .unwrap();
    assert_eq!(id, "-NAbc123");
}

#[tokio::test]
async fn auth_token_rides_along_as_a_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects.json"))
        .and(query_param("auth", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let client = record_client(&server, Some("secret"));
    client.list_all("projects").await.unwrap();
}

#[tokio::test]
async fn an_empty_namespace_lists_as_an_empty_vec() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .mount(&server)
        .await;

    let client = record_client(&server, None);
    assert!(client.list_all("projects").await.unwrap().is_empty());
}

#[tokio::test]
async fn updating_a_missing_record_is_not_found_without_a_write() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/ghost.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .mount(&server)
        .await;
    // a PATCH would silently create the node, so none may be issued
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = record_client(&server, None);
    let result = client
        .update("projects", "ghost", json!({ "title": "X" }))
        .await;
    assert!(matches!(result, Err(ConnectorError::NotFound(_))));
}

#[tokio::test]
async fn delete_checks_existence_before_removing_the_node() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects/-NAbc123.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Alpha" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/projects/-NAbc123.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Null))
        .expect(1)
        .mount(&server)
        .await;

    let client = record_client(&server, None);
    client.delete("projects", "-NAbc123").await.unwrap();
}

#[tokio::test]
async fn an_unreachable_store_reads_as_unavailable() {
    let server = MockServer::start().await;
    // nothing mounted; the server answers 404 which is not success
    let client = record_client(&server, None);
    let result = client.create("projects", json!({ "title": "Alpha" })).await;
    assert!(matches!(result, Err(ConnectorError::StoreUnavailable(_))));
}

#[tokio::test]
async fn upload_yields_url_and_public_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/folio/image/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "secure_url": "https://assets.example.com/image/one.png",
            "public_id": "folio/one"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reference = asset_client(&server).upload(sample_image()).await.unwrap();
    assert_eq!(reference.url, "https://assets.example.com/image/one.png");
    assert_eq!(reference.public_id, "folio/one");
}

#[tokio::test]
async fn a_rejected_upload_is_an_upload_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/folio/image/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": { "message": "Upload preset not found" }
        })))
        .mount(&server)
        .await;

    let result = asset_client(&server).upload(sample_image()).await;
    assert!(matches!(result, Err(ConnectorError::UploadFailed(_))));
}

#[tokio::test]
async fn destroy_surfaces_a_remote_refusal() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/folio/video/destroy"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "result": "not found" })))
        .mount(&server)
        .await;

    let result = asset_client(&server)
        .destroy("folio/gone", AssetKind::Video)
        .await;
    assert!(matches!(result, Err(ConnectorError::DeleteFailed(_))));
}

#[tokio::test]
async fn destroy_with_an_empty_public_id_sends_nothing() {
    let server = MockServer::start().await;

    asset_client(&server)
        .destroy("", AssetKind::Image)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn a_valid_token_resolves_to_an_identity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("Authorization", "Bearer good-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "email": "admin@example.com" })),
        )
        .mount(&server)
        .await;

    let client = IdentityClient::new(&IdentitySettings {
        auth_url: format!("{}/me", server.uri()),
        timeout_secs: 5,
    })
    .unwrap();

    let user = client.verify("good-token").await.unwrap();
    assert_eq!(user.unwrap().email, "admin@example.com");
}

#[tokio::test]
async fn a_rejected_token_resolves_to_nobody() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = IdentityClient::new(&IdentitySettings {
        auth_url: format!("{}/me", server.uri()),
        timeout_secs: 5,
    })
    .unwrap();

    assert!(client.verify("bad-token").await.unwrap().is_none());
}

fn sample_contact() -> ContactForm {
    ContactForm {
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        message: "Hello there".to_string(),
    }
}

#[tokio::test]
async fn contact_messages_reach_the_relay() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .and(body_partial_json(json!({
            "service_id": "service_test",
            "template_params": { "reply_to": "ada@example.com" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let client = EmailClient::new(&EmailSettings {
        base_url: server.uri(),
        service_id: "service_test".to_string(),
        template_id: "template_test".to_string(),
        public_key: "public_test".to_string(),
        timeout_secs: 5,
    })
    .unwrap();

    client.send(&sample_contact()).await.unwrap();
}

#[tokio::test]
async fn a_relay_rejection_is_a_delivery_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1.0/email/send"))
        .respond_with(ResponseTemplate::new(400).set_body_string("The public key is invalid"))
        .mount(&server)
        .await;

    let client = EmailClient::new(&EmailSettings {
        base_url: server.uri(),
        service_id: "service_test".to_string(),
        template_id: "template_test".to_string(),
        public_key: "public_test".to_string(),
        timeout_secs: 5,
    })
    .unwrap();

    let result = client.send(&sample_contact()).await;
    assert!(matches!(result, Err(ConnectorError::DeliveryFailed(_))));
}
