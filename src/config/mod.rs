use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

/// 两次成功推送之间的最短间隔（秒）。
///
/// 原始实现写作 `10 * 1000` 毫秒，注释与对外错误文案却写着“1 分钟”。
/// 这里取 10 秒作为默认值，可通过 `ALERT_COOLDOWN_SECS` 覆盖。
pub const DEFAULT_ALERT_COOLDOWN_SECS: u64 = 10;
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_SERVER_HOST: &str = "::";
pub const DEFAULT_SERVER_PORT: u16 = 3000;
pub const DEFAULT_API_BASE_URI: &str = "/api";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_TWILIO_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value {value:?} for environment variable {var}")]
    Invalid { var: &'static str, value: String },
    #[error("unknown notifier provider {0:?}, expected \"telegram\" or \"twilio\"")]
    UnknownProvider(String),
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub api_base: String,
    pub api_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub api_base: String,
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
    pub to_number: String,
}

#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Telegram(TelegramConfig),
    Twilio(TwilioConfig),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub api_base_uri: String,
    pub alert_cooldown_secs: u64,
    pub provider_timeout_secs: u64,
    pub provider: ProviderConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源构建配置，启动时即校验所有必填项。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider_name = lookup("NOTIFIER_PROVIDER")
            .map(|v| v.trim().to_ascii_lowercase())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "telegram".to_string());

        let provider = match provider_name.as_str() {
            "telegram" => ProviderConfig::Telegram(TelegramConfig {
                api_base: optional(&lookup, "TELEGRAM_API_BASE", DEFAULT_TELEGRAM_API_BASE),
                api_token: required(&lookup, "TELEGRAM_API_TOKEN")?,
                chat_id: required(&lookup, "TELEGRAM_USER_ID")?,
            }),
            "twilio" => ProviderConfig::Twilio(TwilioConfig {
                api_base: optional(&lookup, "TWILIO_API_BASE", DEFAULT_TWILIO_API_BASE),
                account_sid: required(&lookup, "TWILIO_ACCOUNT_SID")?,
                auth_token: required(&lookup, "TWILIO_AUTH_TOKEN")?,
                from_number: required(&lookup, "TWILIO_FROM_NUMBER")?,
                to_number: required(&lookup, "TWILIO_TO_NUMBER")?,
            }),
            _ => return Err(ConfigError::UnknownProvider(provider_name)),
        };

        let provider_timeout_secs =
            parsed(&lookup, "PROVIDER_TIMEOUT_SECS", DEFAULT_PROVIDER_TIMEOUT_SECS)?;
        if provider_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                var: "PROVIDER_TIMEOUT_SECS",
                value: "0".into(),
            });
        }

        Ok(Config {
            server_host: optional(&lookup, "SERVER_HOST", DEFAULT_SERVER_HOST),
            server_port: parsed(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            api_base_uri: normalize_base_uri(&optional(
                &lookup,
                "API_BASE_URI",
                DEFAULT_API_BASE_URI,
            )),
            alert_cooldown_secs: parsed(&lookup, "ALERT_COOLDOWN_SECS", DEFAULT_ALERT_COOLDOWN_SECS)?,
            provider_timeout_secs,
            provider,
        })
    }

    pub fn alert_cooldown(&self) -> Duration {
        Duration::from_secs(self.alert_cooldown_secs)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    pub fn provider_name(&self) -> &'static str {
        match self.provider {
            ProviderConfig::Telegram(_) => "telegram",
            ProviderConfig::Twilio(_) => "twilio",
        }
    }
}

fn required<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn optional<F>(lookup: &F, var: &'static str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
        None => Ok(default),
    }
}

// "/" 或空串表示不加前缀
fn normalize_base_uri(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn telegram_is_the_default_provider() {
        let config = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_API_TOKEN", "token"),
            ("TELEGRAM_USER_ID", "42"),
        ]))
        .unwrap();

        assert_eq!(config.provider_name(), "telegram");
        assert_eq!(config.alert_cooldown(), Duration::from_secs(10));
        assert_eq!(config.provider_timeout(), Duration::from_secs(10));
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.api_base_uri, "/api");
        match config.provider {
            ProviderConfig::Telegram(telegram) => {
                assert_eq!(telegram.api_base, DEFAULT_TELEGRAM_API_BASE);
                assert_eq!(telegram.chat_id, "42");
            }
            other => panic!("expected telegram config, got {other:?}"),
        }
    }

    #[test]
    fn missing_telegram_token_fails_fast() {
        let err = Config::from_lookup(lookup_from(&[("TELEGRAM_USER_ID", "42")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("TELEGRAM_API_TOKEN"));
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let err = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_API_TOKEN", "   "),
            ("TELEGRAM_USER_ID", "42"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("TELEGRAM_API_TOKEN"));
    }

    #[test]
    fn twilio_requires_all_four_credentials() {
        let err = Config::from_lookup(lookup_from(&[
            ("NOTIFIER_PROVIDER", "Twilio"),
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_AUTH_TOKEN", "secret"),
            ("TWILIO_FROM_NUMBER", "+15550000000"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("TWILIO_TO_NUMBER"));
    }

    #[test]
    fn twilio_ignores_telegram_variables() {
        let config = Config::from_lookup(lookup_from(&[
            ("NOTIFIER_PROVIDER", "twilio"),
            ("TWILIO_ACCOUNT_SID", "AC123"),
            ("TWILIO_AUTH_TOKEN", "secret"),
            ("TWILIO_FROM_NUMBER", "+15550000000"),
            ("TWILIO_TO_NUMBER", "+15551111111"),
        ]))
        .unwrap();
        assert_eq!(config.provider_name(), "twilio");
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("NOTIFIER_PROVIDER", "pager")])).unwrap_err();
        assert_eq!(err, ConfigError::UnknownProvider("pager".into()));
    }

    #[test]
    fn invalid_numbers_are_reported_instead_of_defaulted() {
        let err = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_API_TOKEN", "token"),
            ("TELEGRAM_USER_ID", "42"),
            ("ALERT_COOLDOWN_SECS", "ten"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "ALERT_COOLDOWN_SECS",
                value: "ten".into()
            }
        );
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let err = Config::from_lookup(lookup_from(&[
            ("TELEGRAM_API_TOKEN", "token"),
            ("TELEGRAM_USER_ID", "42"),
            ("PROVIDER_TIMEOUT_SECS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                var: "PROVIDER_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn base_uri_is_normalized() {
        assert_eq!(normalize_base_uri("/"), "");
        assert_eq!(normalize_base_uri(""), "");
        assert_eq!(normalize_base_uri("api/"), "/api");
        assert_eq!(normalize_base_uri("/v1/alerts/"), "/v1/alerts");
    }
}
