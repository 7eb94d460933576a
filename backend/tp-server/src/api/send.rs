use crate::{ApiError, AppState, ApiResult as ApiErrorResult};

use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// `key` and `text`, from a form body or the query string
#[derive(Debug, Default, Deserialize)]
pub struct SendParams {
    pub key: Option<String>,
    pub text: Option<String>,
}

impl SendParams {
    /// Fields present in `self` win over those in `fallback`
    pub fn or(self, fallback: SendParams) -> SendParams {
        SendParams {
            key: self.key.or(fallback.key),
            text: self.text.or(fallback.text),
        }
    }
}

/// GET|POST /send - relay `text` to the chat linked to `key`
pub async fn send(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> ApiErrorResult<Response> {
    let query_params: SendParams = serde_urlencoded::from_str(query.as_deref().unwrap_or_default())
        .map_err(|e| ApiError::bad_request(format!("Malformed query string: {}", e)))?;

    let form_params = if is_form(&headers) && !body.is_empty() {
        serde_urlencoded::from_bytes(&body)
            .map_err(|e| ApiError::bad_request(format!("Malformed form body: {}", e)))?
    } else {
        SendParams::default()
    };

    let params = form_params.or(query_params);
    let key = params.key.unwrap_or_default();
    let text = params.text.unwrap_or_default();

    state.relay.send(&key, &text).await?;

    Ok("Ok".into_response())
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}
