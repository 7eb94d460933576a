use crate::{AppState, api, health, request_logging};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let webhook_path = state.webhook_path.clone();

    Router::new()
        // Pages
        .route("/", get(api::index::index))
        .route("/favicon.ico", get(api::index::favicon))
        .route("/dashboard", get(api::dashboard::dashboard))
        // Login widget flow
        .route("/login", get(api::auth::login))
        .route("/logout", get(api::auth::logout))
        // Bot platform updates
        .route(&webhook_path, post(api::webhook::webhook))
        // Relay API (cross-origin callers allowed)
        .route(
            "/send",
            get(api::send::send)
                .post(api::send::send)
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        // Health check
        .route("/health", get(health::health_check))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_logging::log_requests,
        ))
        .with_state(state)
}
