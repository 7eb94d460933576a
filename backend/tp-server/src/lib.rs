pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod pages;
pub mod request_context;
pub mod request_logging;
pub mod routes;
pub mod session_cookie;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{login, logout},
    dashboard::dashboard,
    error::ApiError,
    error::Result as ApiResult,
    extractors::session::Session,
    index::{favicon, index},
    send::{SendParams, send},
    webhook::webhook,
};
pub use app_state::AppState;
pub use error::{Result as ServerResult, ServerError};
pub use pages::Pages;
pub use request_context::RequestContext;
pub use routes::build_router;
pub use session_cookie::SessionCookie;
