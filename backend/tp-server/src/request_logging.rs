//! Request-scoped logging middleware.
//!
//! Only the path is logged. Query strings and bodies carry send keys and
//! login hashes, so they never reach the log. The webhook path embeds part
//! of the bot token and is replaced by a placeholder.

use crate::{AppState, RequestContext};

use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use log::{debug, info, warn};

pub const CORRELATION_HEADER: &str = "x-request-id";

const WEBHOOK_PLACEHOLDER: &str = "/<webhook>";

pub async fn log_requests(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let ctx = RequestContext::new();
    let method = request.method().clone();
    let path = loggable_path(request.uri().path(), &state.webhook_path);

    debug!("{} -> {} {}", ctx.log_prefix(), method, path);
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        warn!(
            "{} <- {} {} {} ({}ms)",
            ctx.log_prefix(),
            method,
            path,
            status.as_u16(),
            ctx.elapsed_ms()
        );
    } else {
        info!(
            "{} <- {} {} {} ({}ms)",
            ctx.log_prefix(),
            method,
            path,
            status.as_u16(),
            ctx.elapsed_ms()
        );
    }

    if let Ok(value) = HeaderValue::from_str(&ctx.correlation_id) {
        response.headers_mut().insert(CORRELATION_HEADER, value);
    }

    response
}

pub(crate) fn loggable_path(path: &str, webhook_path: &str) -> String {
    if path == webhook_path {
        WEBHOOK_PLACEHOLDER.to_string()
    } else {
        path.to_string()
    }
}
