use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::{Notifier, NotifierError};
use crate::config::TwilioConfig;

/// Twilio 短信客户端（`Messages.json` 资源）
pub struct TwilioNotifier {
    config: TwilioConfig,
    client: Client,
}

impl TwilioNotifier {
    pub fn new(config: TwilioConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    fn name(&self) -> &'static str {
        "twilio"
    }

    async fn send(&self, text: &str) -> Result<Value, NotifierError> {
        debug!("Sending SMS to {}", self.config.to_number);

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("Body", text),
                ("From", self.config.from_number.as_str()),
                ("To", self.config.to_number.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(NotifierError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}
