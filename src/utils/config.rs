use std::env;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_TODAY_PRICE_URL: &str = "https://www.nepalstock.com/api/nots/nepse-data/today-price";
const DEFAULT_PAGE_SIZE: u32 = 500;
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
const DEFAULT_TTL_SECS: u64 = 60;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .expect("Invalid HOST/PORT");
        Self { addr }
    }
}

#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub today_price_url: String,
    pub verify_ssl: bool,
    pub page_size: u32,
    pub max_attempts: u32,
}

impl SourceConfig {
    pub fn from_env() -> Self {
        let today_price_url = env::var("NEPSE_TODAY_PRICE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TODAY_PRICE_URL.to_string());
        let verify_ssl = env::var("NEPSE_VERIFY_SSL")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            today_price_url,
            verify_ssl,
            page_size: positive_env("NEPSE_PAGE_SIZE").unwrap_or(DEFAULT_PAGE_SIZE),
            max_attempts: positive_env("FETCH_MAX_ATTEMPTS").unwrap_or(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// 快照有效期，超过即视为过期
    pub ttl: Duration,
    /// 单次上游抓取的超时，超时按抓取失败处理
    pub fetch_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(DEFAULT_TTL_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

impl CacheConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl: positive_env("SNAPSHOT_TTL_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.ttl),
            fetch_timeout: positive_env("FETCH_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
        }
    }
}

fn positive_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value > T::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_defaults() {
        let cfg = CacheConfig::default();
        assert_eq!(cfg.ttl, Duration::from_secs(60));
        assert_eq!(cfg.fetch_timeout, Duration::from_secs(15));
    }

    #[test]
    fn positive_env_ignores_zero_and_garbage() {
        env::set_var("NEPSE_TEST_POSITIVE_ZERO", "0");
        env::set_var("NEPSE_TEST_POSITIVE_BAD", "abc");
        env::set_var("NEPSE_TEST_POSITIVE_OK", " 42 ");
        assert_eq!(positive_env::<u64>("NEPSE_TEST_POSITIVE_ZERO"), None);
        assert_eq!(positive_env::<u64>("NEPSE_TEST_POSITIVE_BAD"), None);
        assert_eq!(positive_env::<u64>("NEPSE_TEST_POSITIVE_OK"), Some(42));
        assert_eq!(positive_env::<u64>("NEPSE_TEST_POSITIVE_UNSET"), None);
    }
}
