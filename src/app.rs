use std::sync::Arc;

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::{
    DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer,
};
use tracing::Level;

use crate::routes;
use crate::services::snapshot_cache::SnapshotCache;
use crate::utils::middleware;

#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SnapshotCache>,
}

pub fn build_app(state: AppState) -> Router {
    routes::build_routes()
        .with_state(state)
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(middleware::cors_layer())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
