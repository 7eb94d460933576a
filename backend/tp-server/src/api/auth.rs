use crate::api::found;
use crate::{ApiError, AppState, ApiResult as ApiErrorResult};

use std::collections::BTreeMap;

use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
};

/// GET /login - target of the login widget redirect; the query string is the assertion
pub async fn login(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> ApiErrorResult<Response> {
    let assertion: BTreeMap<String, String> =
        serde_urlencoded::from_str(query.as_deref().unwrap_or_default())
            .map_err(|e| ApiError::bad_request(format!("Malformed login query: {}", e)))?;

    let outcome = state.registration.on_login(&assertion).await?;

    let cookie = state
        .cookie
        .set(&outcome.session_token)
        .ok_or_else(|| ApiError::internal("Session token is not a valid header value"))?;

    let mut response = found("/dashboard");
    response.headers_mut().insert(header::SET_COOKIE, cookie);
    Ok(response)
}

/// GET /logout - drop the session and go home
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let mut response = found("/");
    response
        .headers_mut()
        .insert(header::SET_COOKIE, state.cookie.clear());
    response
}
