use std::time::Duration;

use destination_client::{
    requests::{self, Level},
    responses::Certificate,
    Client, ClientConfiguration, Destination, DestinationType, Error,
};
use serde_json::json;
use wiremock::{
    matchers::{body_json, body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const API: &str = "/destination-configuration/v1";

async fn mount_token_endpoint(server: &MockServer, expires_in: u64, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .and(header("authorization", "Basic aWQ6c2VjcmV0"))
        .and(body_string_contains("grant_type=client_credentials"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t0k3n",
            "token_type": "bearer",
            "expires_in": expires_in,
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn test_client(server: &MockServer) -> Client {
    Client::builder(ClientConfiguration::new(
        "id",
        "secret",
        server.uri(),
        server.uri(),
    ))
    .timeout(Duration::from_secs(5))
    .build()
    .unwrap()
}

#[tokio::test]
async fn find_forwards_user_token_and_decodes_nested_destination() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 3600, 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/destinations/db1")))
        .and(header("authorization", "Bearer t0k3n"))
        .and(header("accept", "application/json"))
        .and(header("x-user-token", "user-jwt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "owner": {"SubaccountId": "sa", "InstanceId": null},
            "destinationConfiguration": {"Name": "db1", "Type": "RFC", "url": "jdbc:..."},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = requests::find("db1")
        .user_token("user-jwt")
        .send(&test_client(&server))
        .await
        .unwrap();
    assert_eq!(
        result.destination,
        Destination::new("db1", DestinationType::Rfc).with_property("url", "jdbc:...")
    );
    assert_eq!(result.owner.subaccount_id.as_deref(), Some("sa"));
}

#[tokio::test]
async fn access_token_is_reused_across_requests() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 3600, 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/subaccountDestinations")))
        .and(header("authorization", "Bearer t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Name": "d1", "Type": "HTTP"},
            {"Name": "d2", "Type": "RFC", "jco.client.ashost": "host"},
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let first = requests::destinations(Level::Subaccount)
        .send(&client)
        .await
        .unwrap();
    let second = requests::destinations(Level::Subaccount)
        .send(&client.clone())
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[1].property("jco.client.ashost"), Some("host"));
}

#[tokio::test]
async fn access_token_with_huge_lifetime_is_reused() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, u64::MAX, 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/subaccountDestinations")))
        .and(header("authorization", "Bearer t0k3n"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    for _ in 0..2 {
        let destinations = requests::destinations(Level::Subaccount)
            .send(&client)
            .await
            .unwrap();
        assert!(destinations.is_empty());
    }
}

#[tokio::test]
async fn stale_access_token_is_refreshed() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 0, 2).await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/instanceCertificates")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    for _ in 0..2 {
        let certificates = requests::certificates(Level::Instance)
            .send(&client)
            .await
            .unwrap();
        assert!(certificates.is_empty());
    }
}

#[tokio::test]
async fn create_destination_sends_flat_body() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(format!("{API}/subaccountDestinations")))
        .and(body_json(json!({
            "Name": "real",
            "Type": "HTTP",
            "URL": "https://example.com",
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let destination = Destination::new("real", DestinationType::Http)
        .with_property("URL", "https://example.com")
        .with_property("Name", "ignored")
        .with_property("Type", "ignored");
    requests::create_destination(Level::Subaccount, destination)
        .send(&test_client(&server))
        .await
        .unwrap();
}

#[tokio::test]
async fn create_with_unexpected_success_status_is_an_error() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 3600, 1).await;
    Mock::given(method("POST"))
        .and(path(format!("{API}/instanceCertificates")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let certificate = Certificate {
        name: "client.p12".to_string(),
        r#type: "CERTIFICATE".to_string(),
        content: "AAAA".to_string(),
    };
    let error = requests::create_certificate(Level::Instance, certificate)
        .send(&test_client(&server))
        .await
        .unwrap_err();
    assert_eq!(error.status_code(), Some(200));
}

#[tokio::test]
async fn update_returns_affected_records() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 3600, 1).await;
    Mock::given(method("PUT"))
        .and(path(format!("{API}/instanceDestinations")))
        .and(body_json(json!({"Name": "d1", "Type": "MAIL"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 1})))
        .expect(1)
        .mount(&server)
        .await;

    let affected = requests::update_destination(
        Level::Instance,
        Destination::new("d1", DestinationType::Mail),
    )
    .send(&test_client(&server))
    .await
    .unwrap();
    assert_eq!(affected.count, 1);
}

#[tokio::test]
async fn delete_of_missing_destination_returns_remote_error() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 3600, 1).await;
    Mock::given(method("DELETE"))
        .and(path(format!("{API}/subaccountDestinations/missing")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"ErrorMessage": "not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let error = requests::delete_destination(Level::Subaccount, "missing")
        .send(&test_client(&server))
        .await
        .unwrap_err();
    let remote = error.remote().unwrap();
    assert_eq!(remote.message(), "not found");
    assert_eq!(remote.status_code(), 404);
}

#[tokio::test]
async fn names_are_percent_encoded() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 3600, 1).await;
    Mock::given(method("GET"))
        .and(path(format!("{API}/instanceCertificate/my%20cert")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "Name": "my cert",
            "Type": "CERTIFICATE",
            "Content": "AAAA",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let certificate = requests::certificate(Level::Instance, "my cert")
        .send(&test_client(&server))
        .await
        .unwrap();
    assert_eq!(certificate.name, "my cert");
}

#[tokio::test]
async fn rejected_credentials_are_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "unauthorized",
            "error_description": "Bad credentials",
        })))
        .mount(&server)
        .await;

    let error = requests::destinations(Level::Subaccount)
        .send(&test_client(&server))
        .await
        .unwrap_err();
    assert!(matches!(error, Error::Transport(_)), "{error:?}");
    assert_eq!(error.status_code(), None);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 3600, 1).await;
    let client = Client::builder(ClientConfiguration::new(
        "id",
        "secret",
        server.uri(),
        "http://127.0.0.1:1",
    ))
    .timeout(Duration::from_secs(5))
    .build()
    .unwrap();

    let error = requests::destination(Level::Subaccount, "d1")
        .send(&client)
        .await
        .unwrap_err();
    assert!(matches!(error, Error::Transport(_)), "{error:?}");
}
