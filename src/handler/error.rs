use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::snapshot_cache::CacheError;
use crate::utils::time::response_timestamp;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    ServiceUnavailable,
    InternalServerError,
}

impl AppError {
    pub fn stock_not_found(symbol: &str) -> Self {
        AppError::NotFound(format!("Stock '{}' not found", symbol))
    }

    fn parts(&self) -> (StatusCode, String) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Market data is temporarily unavailable".to_string(),
            ),
            AppError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::SourceUnavailable => AppError::ServiceUnavailable,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), "请求失败: {}", message);
        }
        (
            status,
            Json(json!({
                "success": false,
                "timestamp": response_timestamp(),
                "error": message,
            })),
        )
            .into_response()
    }
}
