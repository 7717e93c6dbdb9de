use std::sync::Arc;

use config::Config;
use cooldown::CooldownGate;
use notifier::Notifier;

pub mod config;
pub mod cooldown;
pub mod error;
pub mod middleware;
pub mod notifier;
pub mod router;
pub mod routes;

pub use router::create_router;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notifier: Arc<dyn Notifier>,
    pub cooldown: Arc<CooldownGate>,
}

impl AppState {
    /// 每个进程只构建一次，冷却状态由所有请求共享
    pub fn new(config: Config, notifier: Arc<dyn Notifier>) -> Self {
        let cooldown = Arc::new(CooldownGate::new(config.alert_cooldown()));

        Self {
            config: Arc::new(config),
            notifier,
            cooldown,
        }
    }
}
