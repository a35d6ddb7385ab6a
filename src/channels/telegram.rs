//! Telegram Bot API client — the bot's outbound messaging gateway.
//!
//! Updates arrive through the webhook (see `registration::routes`); this
//! client only sends messages and manages the webhook registration.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::channels::Messenger;
use crate::config::BotConfig;
use crate::error::ChannelError;

/// Path the webhook handler is mounted at.
pub const WEBHOOK_PATH: &str = "/api/webhook";

/// Telegram client — calls the Bot API over HTTPS.
pub struct TelegramClient {
    bot_token: SecretString,
    api_base_url: String,
    client: reqwest::Client,
}

impl TelegramClient {
    pub fn new(bot_token: SecretString, api_base_url: impl Into<String>) -> Self {
        Self {
            bot_token,
            api_base_url: api_base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(config.bot_token.clone(), config.api_base_url.clone())
    }

    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.api_base_url,
            self.bot_token.expose_secret()
        )
    }

    /// POST a JSON body to a Bot API method, mapping transport errors.
    async fn post(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response, ChannelError> {
        self.client
            .post(self.api_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| ChannelError::SendFailed {
                name: "telegram".into(),
                reason: e.without_url().to_string(),
            })
    }

    /// Send a message body, HTML-first with a plain-text fallback.
    ///
    /// `body` must not contain `parse_mode`; it is added for the first try.
    async fn send_message_body(&self, mut body: serde_json::Value) -> Result<(), ChannelError> {
        body["parse_mode"] = json!("HTML");
        let html_resp = self.post("sendMessage", &body).await?;

        if html_resp.status().is_success() {
            return Ok(());
        }

        let html_status = html_resp.status();
        let html_err = html_resp.text().await.unwrap_or_default();

        // Only a 400 means the markup was rejected; anything else would be a resend.
        if html_status != reqwest::StatusCode::BAD_REQUEST {
            return Err(ChannelError::SendFailed {
                name: "telegram".into(),
                reason: format!("sendMessage returned {html_status}: {html_err}"),
            });
        }

        tracing::warn!(
            status = ?html_status,
            error = %html_err,
            "Telegram sendMessage with HTML failed; retrying without parse_mode"
        );

        if let Some(obj) = body.as_object_mut() {
            obj.remove("parse_mode");
        }
        let plain_resp = self.post("sendMessage", &body).await?;

        if !plain_resp.status().is_success() {
            let plain_err = plain_resp.text().await.unwrap_or_default();
            return Err(ChannelError::SendFailed {
                name: "telegram".into(),
                reason: format!(
                    "sendMessage failed (html: {}, plain: {})",
                    html_status, plain_err
                ),
            });
        }

        Ok(())
    }

    /// Register `<public_url>/api/webhook` as the bot's webhook.
    pub async fn set_webhook(&self, public_url: &str) -> Result<(), ChannelError> {
        let url = format!("{}{WEBHOOK_PATH}", public_url.trim_end_matches('/'));
        let body = json!({
            "url": url,
            "allowed_updates": ["message", "callback_query"],
        });

        let resp = self
            .post("setWebhook", &body)
            .await
            .map_err(|e| ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err = resp.text().await.unwrap_or_default();
            return Err(ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: format!("setWebhook returned {status}: {err}"),
            });
        }

        tracing::info!(url = %url, "Telegram webhook registered");
        Ok(())
    }

    /// Check the token against `getMe`.
    pub async fn health_check(&self) -> Result<(), ChannelError> {
        let resp = self
            .client
            .get(self.api_url("getMe"))
            .send()
            .await
            .map_err(|e| ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: e.without_url().to_string(),
            })?;

        if resp.status().is_success() {
            Ok(())
        } else {
            Err(ChannelError::StartupFailed {
                name: "telegram".into(),
                reason: format!("getMe returned {}", resp.status()),
            })
        }
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send_text(&self, chat_id: &str, text: &str) -> Result<(), ChannelError> {
        self.send_message_body(json!({
            "chat_id": chat_id,
            "text": text,
        }))
        .await
    }

    async fn send_options(
        &self,
        chat_id: &str,
        text: &str,
        options: &[&str],
    ) -> Result<(), ChannelError> {
        if options.is_empty() {
            return Err(ChannelError::InvalidMessage(
                "button message needs at least one option".into(),
            ));
        }
        self.send_message_body(json!({
            "chat_id": chat_id,
            "text": text,
            "reply_markup": inline_keyboard(options),
        }))
        .await
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// One button per row; a click echoes the label back as `callback_data`.
fn inline_keyboard(options: &[&str]) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = options
        .iter()
        .map(|option| json!([{ "text": option, "callback_data": option }]))
        .collect();
    json!({ "inline_keyboard": rows })
}

// ── Tests ───────────────────────────────────────────────────────────
