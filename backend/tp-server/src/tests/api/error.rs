use crate::ApiError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use tp_relay::RelayError;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_unauthorized_returns_401_with_json_body() {
    let (status, json) = body_json(RelayError::unauthorized("No such user").into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert_eq!(json["error"]["message"], "No such user");
}

#[tokio::test]
async fn test_bad_request_returns_400() {
    let (status, json) = body_json(RelayError::bad_request("missing text").into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_auth_failed_returns_400_without_details() {
    let error = ApiError::AuthFailed {
        message: "signature_mismatch".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "AUTH_FAILED");
    assert_eq!(json["error"]["message"], "Auth failed");
}

#[tokio::test]
async fn test_queue_closed_maps_to_internal_500() {
    let error: ApiError = RelayError::QueueClosed {
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"]["message"], "Internal server error");
}
