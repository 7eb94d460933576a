use crate::{AppState, ApiResult as ApiErrorResult};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tp_relay::Update;

/// POST <webhook path> - updates pushed by the bot platform.
///
/// Any well-formed update is acknowledged with 200 so the platform does not
/// retry; only a connected-website message changes state.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> ApiErrorResult<Response> {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            log::warn!("Webhook body is not an update: {}", e);
            return Ok((StatusCode::BAD_REQUEST, "No update").into_response());
        }
    };

    if let Some(contact) = update.contact() {
        let outcome = state.registration.on_platform_contact(contact).await?;
        log::debug!("Update {}: contact {}", update.update_id, outcome.label());
    }

    Ok("Ok".into_response())
}
