use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDetail {
    pub symbol: String,
    pub company_name: String,
    pub business_date: String,
    pub price: PriceInfo,
    pub trading: TradingInfo,
    pub year_range: YearRange,
    #[serde(serialize_with = "json_number")]
    pub market_cap: f64,
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInfo {
    #[serde(serialize_with = "json_number")]
    pub current: f64,
    #[serde(serialize_with = "json_number")]
    pub open: f64,
    #[serde(serialize_with = "json_number")]
    pub high: f64,
    #[serde(serialize_with = "json_number")]
    pub low: f64,
    #[serde(serialize_with = "json_number")]
    pub previous_close: f64,
    #[serde(serialize_with = "json_number")]
    pub change: f64,
    #[serde(serialize_with = "json_number")]
    pub change_percent: f64,
    #[serde(serialize_with = "json_number")]
    pub average_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingInfo {
    #[serde(serialize_with = "json_number")]
    pub volume: f64,
    #[serde(serialize_with = "json_number")]
    pub total_trades: f64,
    #[serde(serialize_with = "json_number")]
    pub turnover: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRange {
    #[serde(rename = "high52Week")]
    #[serde(serialize_with = "json_number")]
    pub high_52_week: f64,
    #[serde(rename = "low52Week")]
    #[serde(serialize_with = "json_number")]
    pub low_52_week: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRow {
    pub symbol: String,
    pub company_name: String,
    #[serde(serialize_with = "json_number")]
    pub close_price: f64,
    #[serde(serialize_with = "json_number")]
    pub change: f64,
    #[serde(serialize_with = "json_number")]
    pub change_percent: f64,
    #[serde(serialize_with = "json_number")]
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankRow {
    pub symbol: String,
    pub company_name: String,
    #[serde(serialize_with = "json_number")]
    pub close_price: f64,
    #[serde(serialize_with = "json_number")]
    pub change_percent: f64,
}

/// 单条数据的成功响应
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub timestamp: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stale: bool,
    pub data: T,
}

/// 全量列表的成功响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub success: bool,
    pub timestamp: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub stale: bool,
    pub total_stocks: usize,
    pub data: Vec<ListingRow>,
}

/// 查询参数按键值对接收：重复的 limit 只取第一个，非整数时回退到默认值
#[derive(Debug, Default)]
pub struct LimitQuery {
    pub limit: Option<String>,
}

impl LimitQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let limit = pairs
            .into_iter()
            .find(|(key, _)| key == "limit")
            .map(|(_, value)| value);
        Self { limit }
    }
}

/// 整数值按整数输出（12000 而不是 12000.0），与上游原始 JSON 保持一致
fn json_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0; // 2^53
    if value.fract() == 0.0 && value.abs() < MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
