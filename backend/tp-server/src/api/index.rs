use crate::{ApiError, AppState, ApiResult as ApiErrorResult};

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};

/// GET / - landing page with the login widget
pub async fn index(State(state): State<AppState>) -> ApiErrorResult<Html<String>> {
    let auth_url = format!("{}/login", state.website_url);

    state
        .pages
        .index(&state.bot_username, &auth_url)
        .map(Html)
        .map_err(|e| ApiError::internal(format!("Rendering index failed: {}", e)))
}

/// GET /favicon.ico
pub async fn favicon() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
