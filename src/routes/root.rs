use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::app::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
}

/// 接口说明文档，不读取行情缓存
async fn root() -> Json<Value> {
    Json(json!({
        "message": "NEPSE Stock API - Live Stock Market Data from Nepal Stock Exchange",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/api/stock/<symbol>": "Get detailed data for specific stock (e.g., /api/stock/NABIL)",
            "/api/stocks": "Get all stocks with current prices",
            "/api/gainers?limit=10": "Get top gainers of the day",
            "/api/losers?limit=10": "Get top losers of the day"
        },
        "examples": [
            "/api/stock/NABIL",
            "/api/stock/CHL",
            "/api/gainers?limit=5",
            "/api/losers?limit=5",
            "/api/stocks"
        ]
    }))
}

async fn healthz() -> &'static str {
    "ok"
}
