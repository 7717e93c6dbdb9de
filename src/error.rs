use std::time::Duration;

use axum::Json;
use axum::{
    http::{HeaderValue, StatusCode, header::RETRY_AFTER},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

// 对外文案沿用原有措辞，与实际冷却时长无关
pub const RATE_LIMIT_MESSAGE: &str = "You must wait 1 minute between SMS messages";
pub const SEND_FAILED_MESSAGE: &str = "Failed to send SMS";
pub const INVALID_PAYLOAD_MESSAGE: &str = "Invalid alert payload";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid alert payload: {0}")]
    InvalidPayload(String),
    #[error("alert cooldown active, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },
    #[error("failed to dispatch alert")]
    DispatchFailed,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::InvalidPayload(_) => (StatusCode::BAD_REQUEST, INVALID_PAYLOAD_MESSAGE),
            AppError::RateLimited { .. } => (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE),
            AppError::DispatchFailed => (StatusCode::INTERNAL_SERVER_ERROR, SEND_FAILED_MESSAGE),
        };

        let mut response = (status, Json(ErrorResponse { error })).into_response();

        if let AppError::RateLimited { retry_after } = self {
            // 向上取整到秒
            let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(secs));
        }

        response
    }
}
