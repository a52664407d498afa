use axum::{routing::get, Router};

use crate::app::AppState;
use crate::handler::stock::{get_all_stocks, get_gainers, get_losers, get_stock};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/stock/:symbol", get(get_stock))
        .route("/stocks", get(get_all_stocks))
        .route("/gainers", get(get_gainers))
        .route("/losers", get(get_losers))
}
