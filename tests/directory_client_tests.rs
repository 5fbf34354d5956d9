mod common;

use campath::clients::directory_client::{AccountDirectoryClient, HttpDirectoryClient};
use campath::errors::TransportError;
use common::{directory_config, with_blocking_client, CAMERA_LIST_BODY};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn camera_list_body_is_returned_unmodified() {
    let server = MockServer::start().await;
    let body = format!("[{}]\n", CAMERA_LIST_BODY);
    Mock::given(method("GET"))
        .and(path("/Cameras/findall"))
        .and(query_param("userid", "17"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let fetched = with_blocking_client(server.uri(), 5, |client| client.fetch_camera_list_raw(17)).await;
    assert_eq!(fetched.unwrap(), body);
}

#[tokio::test]
async fn non_success_status_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Cameras/findall"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let result = with_blocking_client(server.uri(), 5, |client| client.fetch_camera_list_raw(3)).await;
    assert!(matches!(result, Err(TransportError::Status { status: 500, .. })));
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Cameras/findall"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let result = with_blocking_client(server.uri(), 1, |client| client.fetch_camera_list_raw(3)).await;
    assert!(matches!(result, Err(TransportError::Timeout { .. })), "got {:?}", result);
}

#[test]
fn refused_connection_is_a_connection_error() {
    // Port 9 (discard) is closed on test machines.
    let client = HttpDirectoryClient::new(&directory_config("http://127.0.0.1:9", 5)).unwrap();
    let result = client.fetch_camera_list_raw(1);
    assert!(matches!(result, Err(TransportError::Connection { .. })), "got {:?}", result);
}

#[tokio::test]
async fn username_resolves_to_account_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Accounts/getbyusername"))
        .and(query_param("username", "ciaran"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"[{"userid":17,"username":"ciaran","password":"hunter2"}]"#),
        )
        .mount(&server)
        .await;

    let result = with_blocking_client(server.uri(), 5, |client| client.resolve_account_id("ciaran")).await;
    assert_eq!(result.unwrap(), 17);
}

#[tokio::test]
async fn zero_userid_means_unknown_account() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Accounts/getbyusername"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"userid":0}"#))
        .mount(&server)
        .await;

    let result = with_blocking_client(server.uri(), 5, |client| client.resolve_account_id("ghost")).await;
    match result {
        Err(TransportError::UnknownAccount { username }) => assert_eq!(username, "ghost"),
        other => panic!("expected UnknownAccount, got {:?}", other),
    }
}

#[tokio::test]
async fn unexpected_account_shape_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Accounts/getbyusername"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"seventeen"}"#))
        .mount(&server)
        .await;

    let result = with_blocking_client(server.uri(), 5, |client| client.resolve_account_id("x")).await;
    assert!(matches!(result, Err(TransportError::InvalidResponse { .. })));
}
