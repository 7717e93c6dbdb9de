use axum::{
    Router,
    routing::{get, post},
};

use crate::{AppState, middleware::log_errors, routes};

// 告警相关的路由
fn alert_routes() -> Router<AppState> {
    Router::new()
        .route("/alert", post(routes::alert::submit_alert))
        .route("/ping", get(routes::health::ping))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let base_uri = state.config.api_base_uri.clone();

    let router = if base_uri.is_empty() {
        Router::new().merge(alert_routes())
    } else {
        Router::new().nest(&base_uri, alert_routes())
    };

    let router = router.layer(axum::middleware::from_fn(log_errors));

    // 仅在开发模式下允许跨域
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
