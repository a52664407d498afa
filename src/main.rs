mod api_models;
mod app;
mod handler;
mod models;
mod routes;
mod services;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::services::nepse_source::NepseSource;
use crate::services::snapshot_cache::SnapshotCache;
use crate::utils::config::{CacheConfig, ServerConfig, SourceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    utils::logging::init_logging();

    let cfg = ServerConfig::from_env();
    let addr: SocketAddr = cfg.addr;

    let source_cfg = SourceConfig::from_env();
    let cache_cfg = CacheConfig::from_env();
    tracing::info!(
        url = %source_cfg.today_price_url,
        ttl_secs = cache_cfg.ttl.as_secs(),
        fetch_timeout_secs = cache_cfg.fetch_timeout.as_secs(),
        "行情数据源配置"
    );

    let source = NepseSource::new(&source_cfg)?;
    let cache = Arc::new(SnapshotCache::new(Arc::new(source), cache_cfg));

    // 启动时预热，不阻塞监听
    let warm = cache.clone();
    tokio::spawn(async move { warm.warm_up().await });

    let app = app::build_app(app::AppState { cache });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Axum listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
