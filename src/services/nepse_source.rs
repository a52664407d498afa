use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tokio::time::sleep;

use crate::utils::config::SourceConfig;
use crate::utils::http_client::create_nepse_client;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("bad status: {0}")]
    BadStatus(u16),
    #[error("unexpected payload: {0}")]
    UnexpectedPayload(String),
    #[error("fetch timed out after {0:?}")]
    Timeout(Duration),
}

/// 全市场行情数据源，每次调用返回当日全部原始条目
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_today_prices(&self) -> Result<Vec<Value>, SourceError>;
}

/// NEPSE today-price 接口
pub struct NepseSource {
    client: Client,
    url: String,
    page_size: u32,
    max_attempts: u32,
}

impl NepseSource {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let client = create_nepse_client(config.verify_ssl)?;
        Ok(Self {
            client,
            url: config.today_price_url.clone(),
            page_size: config.page_size,
            max_attempts: config.max_attempts.max(1),
        })
    }
}

#[async_trait]
impl SnapshotSource for NepseSource {
    async fn fetch_today_prices(&self) -> Result<Vec<Value>, SourceError> {
        let size = self.page_size.to_string();
        let mut attempt = 0;
        let json: Value = loop {
            attempt += 1;
            let resp = self
                .client
                .get(&self.url)
                .query(&[("size", size.as_str())])
                .send()
                .await;

            match resp {
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().await?;
                    if !status.is_success() {
                        let retryable = matches!(status.as_u16(), 429 | 500 | 502 | 503 | 504);
                        if retryable && attempt < self.max_attempts {
                            tracing::warn!(
                                "NEPSE 行情接口返回非成功状态，准备重试: status={}, attempt={}",
                                status,
                                attempt
                            );
                            sleep(backoff(attempt)).await;
                            continue;
                        }
                        return Err(SourceError::BadStatus(status.as_u16()));
                    }
                    break serde_json::from_str(&body)?;
                }
                Err(e) => {
                    if attempt < self.max_attempts {
                        tracing::warn!(
                            "NEPSE 行情接口请求失败，准备重试: error={}, attempt={}",
                            e,
                            attempt
                        );
                        sleep(backoff(attempt)).await;
                        continue;
                    }
                    return Err(SourceError::Http(e));
                }
            }
        };

        extract_items(json)
    }
}

fn backoff(attempt: u32) -> Duration {
    let base = 200_u64.saturating_mul(attempt as u64);
    let jitter = rand::thread_rng().gen_range(0..=150);
    Duration::from_millis(base + jitter)
}

/// 接口可能直接返回数组，也可能是分页对象 `{ "content": [...] }`
pub fn extract_items(json: Value) -> Result<Vec<Value>, SourceError> {
    match json {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("content") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(SourceError::UnexpectedPayload(
                "missing content array".to_string(),
            )),
        },
        other => Err(SourceError::UnexpectedPayload(format!(
            "expected array or object, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
