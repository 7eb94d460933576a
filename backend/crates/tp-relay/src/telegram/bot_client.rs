//! Minimal Telegram Bot API client.
//!
//! Ref: <https://core.telegram.org/bots/api#making-requests>

use crate::telegram::{Result as TelegramResult, TelegramError};
use crate::{DeliveryError, OutboundChannel, OutboundMessage, ParseMode};

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use tp_core::ChatId;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Every Bot API response is wrapped in this envelope
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    description: Option<String>,
}

pub struct TelegramBotClient {
    api_url: String,
    token: String,
    client: ReqwestClient,
}

impl TelegramBotClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `api_url` - Bot API base URL (e.g., "https://api.telegram.org")
    /// * `token` - Bot token issued by BotFather
    pub fn new(api_url: &str, token: &str) -> TelegramResult<Self> {
        let client = ReqwestClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            client,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// POST a JSON body to a Bot API method and check the envelope
    async fn call<B: Serialize>(&self, method: &str, body: &B) -> TelegramResult<()> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let envelope: Option<ApiResponse> = response.json().await.ok();

        match envelope {
            Some(ApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(ApiResponse { description, .. }) => Err(TelegramError::api(
                status.as_u16(),
                description.unwrap_or_else(|| String::from("no description")),
            )),
            None => Err(TelegramError::api(
                status.as_u16(),
                "response is not a Bot API envelope",
            )),
        }
    }

    /// Send a text message to a chat
    pub async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        parse_mode: ParseMode,
    ) -> TelegramResult<()> {
        #[derive(Serialize)]
        struct SendMessageRequest<'a> {
            chat_id: i64,
            text: &'a str,
            parse_mode: ParseMode,
        }

        let body = SendMessageRequest {
            chat_id: chat_id.0,
            text,
            parse_mode,
        };
        self.call("sendMessage", &body).await?;

        debug!("sendMessage ok for chat {}", chat_id);
        Ok(())
    }

    /// Point the bot's updates at `url`
    pub async fn set_webhook(&self, url: &str) -> TelegramResult<()> {
        #[derive(Serialize)]
        struct SetWebhookRequest<'a> {
            url: &'a str,
        }

        self.call("setWebhook", &SetWebhookRequest { url }).await?;

        info!("Webhook registered");
        Ok(())
    }
}

#[async_trait]
impl OutboundChannel for TelegramBotClient {
    async fn deliver(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        self.send_message(message.chat_id, &message.text, message.parse_mode)
            .await
            .map_err(DeliveryError::from)
    }
}
