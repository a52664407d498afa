//! 全市场行情快照缓存
//!
//! 进程内唯一实例，启动时创建并放入 `AppState`。
//! - 快照在 `ttl` 内有效，过期或缺失时向上游抓取一次；
//! - 并发请求共享同一次刷新，等待者直接采用该次刷新的结果，不会各自再抓；
//! - 抓取失败或超时保留旧快照并标记为过期数据返回，没有旧快照时报 `SourceUnavailable`。

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tokio::time::{timeout, Instant};

use crate::models::Snapshot;
use crate::services::nepse_source::{SnapshotSource, SourceError};
use crate::utils::config::CacheConfig;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no market snapshot available")]
    SourceUnavailable,
}

/// `get_snapshot` 的结果：快照引用，以及它是否是刷新失败后沿用的过期数据
#[derive(Debug, Clone)]
pub struct CachedSnapshot {
    pub snapshot: Arc<Snapshot>,
    pub stale: bool,
}

struct Entry {
    snapshot: Arc<Snapshot>,
    fetched: Instant,
}

#[derive(Default)]
struct CacheState {
    current: Option<Entry>,
    /// 已完成的刷新次数（成功或失败都计），等待者据此判断是否已有人替它刷新过
    refreshes: u64,
}

pub struct SnapshotCache {
    source: Arc<dyn SnapshotSource>,
    config: CacheConfig,
    state: RwLock<CacheState>,
    refresh_lock: Mutex<()>,
}

impl SnapshotCache {
    pub fn new(source: Arc<dyn SnapshotSource>, config: CacheConfig) -> Self {
        Self {
            source,
            config,
            state: RwLock::new(CacheState::default()),
            refresh_lock: Mutex::new(()),
        }
    }

    pub async fn get_snapshot(&self) -> Result<CachedSnapshot, CacheError> {
        let observed = {
            let state = self.state.read().await;
            if let Some(entry) = &state.current {
                if self.is_fresh(entry) {
                    return Ok(CachedSnapshot {
                        snapshot: entry.snapshot.clone(),
                        stale: false,
                    });
                }
            }
            state.refreshes
        };

        let _guard = self.refresh_lock.lock().await;

        {
            let state = self.state.read().await;
            if state.refreshes != observed {
                // 排队期间别人已经刷新过，直接采用那次的结果
                return self.outcome(&state);
            }
        }

        self.refresh().await
    }

    /// 启动预热：走正常的取数路径，只记录结果
    pub async fn warm_up(&self) {
        match self.get_snapshot().await {
            Ok(cached) => tracing::info!(
                records = cached.snapshot.len(),
                "行情快照预热完成"
            ),
            Err(e) => tracing::warn!("行情快照预热失败，将在首个请求时重试: {}", e),
        }
    }

    // 调用方须持有 refresh_lock
    async fn refresh(&self) -> Result<CachedSnapshot, CacheError> {
        let started = Instant::now();
        let fetch = self.source.fetch_today_prices();
        let fetched = match timeout(self.config.fetch_timeout, fetch).await {
            Ok(result) => result,
            Err(_) => Err(SourceError::Timeout(self.config.fetch_timeout)),
        };

        let mut state = self.state.write().await;
        state.refreshes += 1;

        match fetched {
            Ok(raw) => {
                let snapshot = Arc::new(Snapshot::ingest(&raw, Utc::now()));
                tracing::info!(
                    records = snapshot.len(),
                    skipped = snapshot.skipped(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "行情快照已刷新"
                );
                state.current = Some(Entry {
                    snapshot: snapshot.clone(),
                    fetched: Instant::now(),
                });
                Ok(CachedSnapshot {
                    snapshot,
                    stale: false,
                })
            }
            Err(e) => {
                match &state.current {
                    Some(entry) => tracing::warn!(
                        fetched_at = %entry.snapshot.fetched_at(),
                        "行情刷新失败，沿用旧快照: {}",
                        e
                    ),
                    None => tracing::error!("行情刷新失败且没有可用快照: {}", e),
                }
                self.outcome(&state)
            }
        }
    }

    fn outcome(&self, state: &CacheState) -> Result<CachedSnapshot, CacheError> {
        state
            .current
            .as_ref()
            .map(|entry| CachedSnapshot {
                snapshot: entry.snapshot.clone(),
                stale: !self.is_fresh(entry),
            })
            .ok_or(CacheError::SourceUnavailable)
    }

    fn is_fresh(&self, entry: &Entry) -> bool {
        entry.fetched.elapsed() < self.config.ttl
    }
}
