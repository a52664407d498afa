use chrono::{SecondsFormat, Utc};

/// 响应生成时间（RFC 3339），不是数据抓取时间
pub fn response_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
