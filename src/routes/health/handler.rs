use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

use crate::AppState;

/// Ping响应
#[derive(Debug, Serialize)]
pub struct PingResponse {
    /// 服务状态
    pub status: &'static str,
    /// 服务器时间
    pub timestamp: i64,
    /// 当前推送渠道
    pub provider: &'static str,
}

/// 健康检查接口
pub async fn ping(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    (
        StatusCode::OK,
        Json(PingResponse {
            status: "ok",
            timestamp: now.timestamp(),
            provider: state.notifier.name(),
        }),
    )
}
