//! Axum extractor resolving the session cookie to a stored user

use crate::session_cookie::read_session_token;
use crate::{ApiError, AppState};

use std::future::Future;

use axum::{extract::FromRequestParts, http::request::Parts};
use tp_core::User;

/// Who the request's session cookie belongs to
#[derive(Debug)]
pub enum Session {
    /// No cookie, or a token that fails validation
    Anonymous,
    /// A valid token naming a user that is not in the store
    Orphaned { user_id: i64 },
    Active(User),
}

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let Some(token) = read_session_token(&parts.headers) else {
                return Ok(Session::Anonymous);
            };

            let user_id = match state.sessions.validate(&token) {
                Ok(user_id) => user_id,
                Err(e) => {
                    log::debug!("Ignoring session cookie: {}", e.reason());
                    return Ok(Session::Anonymous);
                }
            };

            match state.store.get_by_id(user_id).await {
                Ok(Some(user)) => Ok(Session::Active(user)),
                Ok(None) => Ok(Session::Orphaned { user_id }),
                Err(e) => Err(ApiError::internal(format!(
                    "Session lookup for user {} failed: {}",
                    user_id, e
                ))),
            }
        }
    }
}
