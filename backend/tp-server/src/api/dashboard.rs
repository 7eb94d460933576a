use crate::api::found;
use crate::{ApiError, AppState, ApiResult as ApiErrorResult, Session};

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};

/// GET /dashboard - the user's name and send key
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> ApiErrorResult<Response> {
    let user = match session {
        Session::Anonymous => return Ok(found("/")),
        Session::Orphaned { user_id } => {
            log::warn!("Session names unknown user {}; logging out", user_id);
            return Ok(found("/logout"));
        }
        Session::Active(user) => user,
    };

    let send_key = user.link.as_ref().map(|link| link.send_key.as_str());
    let send_url = format!("{}/send", state.website_url);

    let page = state
        .pages
        .dashboard(&user.first_name, send_key, &state.bot_username, &send_url)
        .map_err(|e| ApiError::internal(format!("Rendering dashboard failed: {}", e)))?;

    Ok(Html(page).into_response())
}
