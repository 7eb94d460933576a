pub mod auth;
pub mod dashboard;
pub mod error;
pub mod extractors;
pub mod index;
pub mod send;
pub mod webhook;

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

/// 302 Found (axum's `Redirect::to` answers 303)
pub(crate) fn found(location: &'static str) -> Response {
    (
        StatusCode::FOUND,
        [(header::LOCATION, HeaderValue::from_static(location))],
    )
        .into_response()
}
