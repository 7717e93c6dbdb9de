use std::net::{IpAddr, SocketAddr};

use speed_alert_relay::{AppState, config::Config, create_router, notifier};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置，缺少凭据时直接退出
    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 设置推送渠道
    let notifier = notifier::from_config(&config).unwrap_or_else(|e| {
        tracing::error!("Failed to create notifier: {}", e);
        std::process::exit(1);
    });
    tracing::info!(
        provider = config.provider_name(),
        cooldown_secs = config.alert_cooldown_secs,
        timeout_secs = config.provider_timeout_secs,
        "Alert relay configured"
    );

    // 设置应用状态
    let state = AppState::new(config, notifier);

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    let app = create_router(state);

    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
