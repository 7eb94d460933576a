#![allow(dead_code)]

//! Test infrastructure for tp-server router tests

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tp_auth::AuthVerifier;
use tp_config::Config;
use tp_db::Database;
use tp_relay::{
    DeliveryError, DeliveryQueue, DeliveryWorker, OutboundChannel, OutboundMessage, RelayMetrics,
};
use tp_server::{AppState, build_router};

pub const BOT_TOKEN: &str = "123456789:ABCDefGHIIklmnOpQrsTUVWXyZ123456789";
pub const WEBHOOK_PATH: &str = "/ABCDefGHIIklmnOpQrsTUVWXyZ123456789";
pub const SECRET_KEY: &str = "0123456789abcdef0123456789abcdef";

/// Records every delivered message
#[derive(Default)]
pub struct RecordingChannel {
    delivered: Mutex<Vec<OutboundMessage>>,
}

impl RecordingChannel {
    pub fn delivered(&self) -> Vec<OutboundMessage> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl OutboundChannel for RecordingChannel {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        self.delivered.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.telegram.bot_token = BOT_TOKEN.to_string();
    config.telegram.bot_username = "telepush_bot".to_string();
    config.website.url = "https://push.example.org".to_string();
    config.session.secret_key = SECRET_KEY.to_string();
    config
}

/// App state over an in-memory store and a recording channel
pub struct TestApp {
    pub state: AppState,
    pub channel: Arc<RecordingChannel>,
    pub worker: DeliveryWorker,
}

pub async fn create_test_app() -> TestApp {
    let config = test_config();
    let database = Database::in_memory()
        .await
        .expect("Failed to create test database");
    let channel = Arc::new(RecordingChannel::default());
    let metrics = RelayMetrics::new();
    let (queue, worker) = DeliveryQueue::start(channel.clone(), metrics.clone());
    let state = AppState::new(&config, database, queue, metrics).expect("Failed to build state");

    TestApp {
        state,
        channel,
        worker,
    }
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// Log in through /login and return the `Cookie` header value for the session
    pub async fn login(&self, id: i64, first_name: &str) -> String {
        let response = self
            .get(&format!("/login?{}", login_query(id, first_name)), None)
            .await;
        session_cookie(&response).expect("login did not set a session cookie")
    }

    /// Post a connected-website update for `user_id` from chat `chat_id`
    pub async fn connect(&self, user_id: i64, chat_id: i64) -> Response<Body> {
        self.post_json(WEBHOOK_PATH, connected_website_update(user_id, chat_id))
            .await
    }

    /// Drop every queue handle and wait for pending deliveries
    pub async fn drain(self) -> (usize, Arc<RecordingChannel>) {
        let TestApp {
            state,
            channel,
            worker,
        } = self;
        drop(state);
        (worker.join().await, channel)
    }
}

/// A signed login query string for `id`, dated now
pub fn login_query(id: i64, first_name: &str) -> String {
    let mut assertion = BTreeMap::new();
    assertion.insert("id".to_string(), id.to_string());
    assertion.insert("first_name".to_string(), first_name.to_string());
    assertion.insert(
        "auth_date".to_string(),
        chrono::Utc::now().timestamp().to_string(),
    );
    let hash = AuthVerifier::from_bot_token(BOT_TOKEN)
        .sign(&assertion)
        .unwrap();
    assertion.insert("hash".to_string(), hash);

    serde_urlencoded::to_string(&assertion).unwrap()
}

pub fn connected_website_update(user_id: i64, chat_id: i64) -> serde_json::Value {
    serde_json::json!({
        "update_id": 100,
        "message": {
            "message_id": 1,
            "date": 1700000000,
            "from": { "id": user_id, "is_bot": false, "first_name": "Bob" },
            "chat": { "id": chat_id, "type": "private" },
            "connected_website": "push.example.org"
        }
    })
}

/// `name=value` of the session cookie set by a response, if any
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find(|value| value.starts_with("telepush_session="))
        .and_then(|value| value.split(';').next())
        .map(str::to_string)
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The 64-character key shown on the dashboard, if any
pub fn key_from_dashboard(html: &str) -> Option<String> {
    let start = html.find("<pre id=\"send-key\">")? + "<pre id=\"send-key\">".len();
    let end = start + html[start..].find("</pre>")?;
    Some(html[start..end].to_string())
}
