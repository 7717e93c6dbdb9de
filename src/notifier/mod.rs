//! 告警推送渠道。
//!
//! 进程启动时根据 [`Config`] 选定唯一的推送渠道（Telegram 机器人或 Twilio 短信），
//! 处理函数只依赖 [`Notifier`] trait。

mod telegram;
mod twilio;

pub use telegram::TelegramNotifier;
pub use twilio::TwilioNotifier;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::config::{Config, ProviderConfig};

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    #[error("provider returned a malformed response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("provider rejected the message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

// Telegram 的请求地址包含机器人 token，错误信息中去掉 URL
impl From<reqwest::Error> for NotifierError {
    fn from(e: reqwest::Error) -> Self {
        NotifierError::Http(e.without_url())
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// 渠道名称，用于日志与健康检查
    fn name(&self) -> &'static str;

    /// 发送文本并返回渠道的原始响应体
    async fn send(&self, text: &str) -> Result<Value, NotifierError>;
}

pub fn from_config(config: &Config) -> Result<Arc<dyn Notifier>, NotifierError> {
    let client = http_client(config.provider_timeout())?;

    let notifier: Arc<dyn Notifier> = match &config.provider {
        ProviderConfig::Telegram(telegram) => {
            Arc::new(TelegramNotifier::new(telegram.clone(), client))
        }
        ProviderConfig::Twilio(twilio) => Arc::new(TwilioNotifier::new(twilio.clone(), client)),
    };

    Ok(notifier)
}

pub fn http_client(timeout: Duration) -> Result<reqwest::Client, NotifierError> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}
