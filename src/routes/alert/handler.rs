use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tokio::time::Instant;

use super::model::{AlertRequest, AlertResponse};
use crate::AppState;
use crate::error::AppError;

pub const SENT_MESSAGE: &str = "SMS sent successfully";

#[axum::debug_handler]
pub async fn submit_alert(
    State(state): State<AppState>,
    payload: Result<Json<AlertRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // 以收到请求的时刻计算冷却，而不是渠道返回的时刻
    let now = Instant::now();

    let Json(alert) = payload.map_err(|e| {
        tracing::warn!("Rejected alert payload: {}", e.body_text());
        AppError::InvalidPayload(e.body_text())
    })?;

    let permit = state.cooldown.try_acquire(now).map_err(|cooling| {
        tracing::debug!(
            "Alert rejected, cooldown active for another {:?}",
            cooling.retry_after
        );
        AppError::RateLimited {
            retry_after: cooling.retry_after,
        }
    })?;

    let text = alert.to_message();

    match state.notifier.send(&text).await {
        Ok(response) => {
            tracing::info!(
                provider = state.notifier.name(),
                street = %alert.street,
                speed = alert.speed,
                "Speeding alert dispatched"
            );
            Ok((
                StatusCode::OK,
                Json(AlertResponse {
                    message: SENT_MESSAGE,
                    response,
                }),
            ))
        }
        Err(e) => {
            // 只有明确失败才归还冷却时间，请求被取消时保留占位
            permit.release();
            tracing::error!("Error sending alert via {}: {}", state.notifier.name(), e);
            Err(AppError::DispatchFailed)
        }
    }
}
