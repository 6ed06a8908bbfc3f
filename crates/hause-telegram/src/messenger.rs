//! Bot messaging API seam.
//!
//! [`BotMessenger`] is the only contract the rest of the system has with the
//! messaging platform: send a message, validate a credential, register a
//! webhook target. All three report booleans; transport errors are logged and
//! collapsed into `false`.

use async_trait::async_trait;
use tracing::warn;

/// Telegram Bot API base.
const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Outbound messaging operations, keyed by per-community bot credentials.
#[async_trait]
pub trait BotMessenger: Send + Sync {
    /// Sends a text message. Returns whether the platform accepted it.
    async fn send(&self, bot_token: &str, chat_id: &str, text: &str) -> bool;

    /// Validates that a bot credential is live (`getMe`).
    async fn validate(&self, bot_token: &str) -> bool;

    /// Registers the inbound webhook target for a community's bot.
    async fn register_webhook(&self, bot_token: &str, webhook_url: &str) -> bool;
}

/// HTTP implementation over the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramMessenger {
    client: reqwest::Client,
    api_base: String,
}

impl TelegramMessenger {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: TELEGRAM_API_BASE.to_string(),
        }
    }

    #[cfg(test)]
    fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: api_base.into(),
        }
    }

    fn method_url(&self, bot_token: &str, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_base, bot_token, method)
    }
}

impl Default for TelegramMessenger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BotMessenger for TelegramMessenger {
    async fn send(&self, bot_token: &str, chat_id: &str, text: &str) -> bool {
        let result = self
            .client
            .post(self.method_url(bot_token, "sendMessage"))
            .json(&serde_json::json!({ "chat_id": chat_id, "text": text }))
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Error sending Telegram message");
                false
            }
        }
    }

    async fn validate(&self, bot_token: &str) -> bool {
        let result = self
            .client
            .get(self.method_url(bot_token, "getMe"))
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Error validating Telegram bot token");
                false
            }
        }
    }

    async fn register_webhook(&self, bot_token: &str, webhook_url: &str) -> bool {
        let result = self
            .client
            .post(self.method_url(bot_token, "setWebhook"))
            .query(&[("url", webhook_url)])
            .send()
            .await;

        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!(error = %e, "Error setting Telegram webhook");
                false
            }
        }
    }
}

/// Builds the webhook target URL for a community.
pub fn webhook_url(public_base_url: &str, community_id: &str) -> String {
    format!(
        "{}/api/webhooks/telegram/{}",
        public_base_url.trim_end_matches('/'),
        community_id
    )
}
