use axum::http::Uri;
use axum::Router;

use crate::app::AppState;
use crate::handler::error::AppError;

mod root;
mod stock;

pub fn build_routes() -> Router<AppState> {
    Router::new()
        // 根路径与健康检查
        .merge(root::router())
        // 业务 API 统一挂在 /api 前缀下
        .nest("/api", stock::router())
        // 未匹配的路径（如 /api/stock/）也返回统一的错误信封
        .fallback(route_not_found)
}

async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Route '{}' not found", uri.path()))
}
