//! The `telepush_session` cookie carrying the signed session token.

use axum::http::{HeaderMap, HeaderValue, header};

pub const SESSION_COOKIE_NAME: &str = "telepush_session";

/// Cookie attributes shared by every response that sets or clears the session
#[derive(Debug, Clone, Copy)]
pub struct SessionCookie {
    pub max_age_secs: u64,
    /// Only sent over https
    pub secure: bool,
}

impl SessionCookie {
    pub fn new(max_age_secs: u64, secure: bool) -> Self {
        Self {
            max_age_secs,
            secure,
        }
    }

    /// `Set-Cookie` value establishing a session
    pub fn set(&self, token: &str) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.render(token, self.max_age_secs)).ok()
    }

    /// `Set-Cookie` value expiring the session
    pub fn clear(&self) -> HeaderValue {
        match HeaderValue::from_str(&self.render("", 0)) {
            Ok(value) => value,
            Err(_) => HeaderValue::from_static("telepush_session=; Max-Age=0; Path=/"),
        }
    }

    fn render(&self, value: &str, max_age_secs: u64) -> String {
        let mut cookie = format!(
            "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Lax",
            SESSION_COOKIE_NAME, value, max_age_secs
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// The session token from the request's `Cookie` headers, if present and non-empty
pub fn read_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE_NAME)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
