mod common;

use common::{checkout_path, client, MERCHANT, READER, TOKEN};
use mockito::Matcher;
use serde_json::json;
use sumup_reader::domain::checkout::{CheckoutRequest, ReaderTarget};
use sumup_reader::domain::ports::CheckoutGateway;
use sumup_reader::error::ReaderError;

fn target() -> ReaderTarget {
    ReaderTarget::new(MERCHANT, READER).unwrap()
}

fn request() -> CheckoutRequest {
    CheckoutRequest::new("EUR", 2, 1050).unwrap()
}

#[tokio::test]
async fn test_checkout_returns_client_transaction_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", checkout_path().as_str())
        .match_header("authorization", format!("Bearer {TOKEN}").as_str())
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "total_amount": {"currency": "EUR", "minor_unit": 2, "value": 1050}
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data": {"client_transaction_id": "f2f1d7a3-tx"}}"#)
        .expect(1)
        .create_async()
        .await;

    let result = client(&server.url())
        .create_checkout(&target(), &request())
        .await
        .unwrap();

    assert_eq!(result.transaction_id, "f2f1d7a3-tx");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_transaction_id_is_response_shape_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", checkout_path().as_str())
        .with_status(200)
        .with_body(r#"{"data": {}}"#)
        .create_async()
        .await;

    let result = client(&server.url())
        .create_checkout(&target(), &request())
        .await;

    assert!(matches!(result, Err(ReaderError::ResponseShape(_))));
}

#[tokio::test]
async fn test_missing_data_is_response_shape_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", checkout_path().as_str())
        .with_status(200)
        .with_body(r#"{"id": "abc"}"#)
        .create_async()
        .await;

    let result = client(&server.url())
        .create_checkout(&target(), &request())
        .await;

    assert!(matches!(result, Err(ReaderError::ResponseShape(_))));
}

#[tokio::test]
async fn test_non_string_transaction_id_is_response_shape_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", checkout_path().as_str())
        .with_status(201)
        .with_body(r#"{"data": {"client_transaction_id": 12345}}"#)
        .create_async()
        .await;

    let result = client(&server.url())
        .create_checkout(&target(), &request())
        .await;

    assert!(matches!(result, Err(ReaderError::ResponseShape(_))));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", checkout_path().as_str())
        .with_status(200)
        .with_body("OK")
        .create_async()
        .await;

    let result = client(&server.url())
        .create_checkout(&target(), &request())
        .await;

    assert!(matches!(result, Err(ReaderError::Decode(_))));
}

#[tokio::test]
async fn test_error_status_is_api_error_and_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", checkout_path().as_str())
        .with_status(422)
        .with_body(r#"{"errors": {"type": "READER_OFFLINE"}, "detail": "Reader is offline"}"#)
        .expect(1)
        .create_async()
        .await;

    let result = client(&server.url())
        .create_checkout(&target(), &request())
        .await;

    match result {
        Err(ReaderError::Api { status, message }) => {
            assert_eq!(status, 422);
            assert_eq!(message, "Reader is offline");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let result = client("http://127.0.0.1:1")
        .create_checkout(&target(), &request())
        .await;

    assert!(matches!(result, Err(ReaderError::Transport(_))));
}
