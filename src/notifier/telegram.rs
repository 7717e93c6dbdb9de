use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{Notifier, NotifierError};
use crate::config::TelegramConfig;

/// Telegram 机器人 `sendMessage` 客户端
pub struct TelegramNotifier {
    config: TelegramConfig,
    client: Client,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.api_base.trim_end_matches('/'),
            self.config.api_token
        )
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(&self, text: &str) -> Result<Value, NotifierError> {
        debug!("Sending Telegram message to chat_id: {}", self.config.chat_id);

        let response = self
            .client
            .post(self.send_message_url())
            .json(&SendMessageRequest {
                chat_id: &self.config.chat_id,
                text,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // 任何能正常返回的调用都视为已发送，非 2xx 只记录告警
        if !status.is_success() {
            warn!("Telegram API returned {}: {}", status, body);
        }

        Ok(serde_json::from_str(&body)?)
    }
}
