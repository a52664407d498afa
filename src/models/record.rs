use serde_json::Value;

use crate::utils::number_parser::{parse_f64, parse_string};
use crate::utils::percent::change_percent;

const MISSING_TEXT: &str = "N/A";

/// 单只股票当日行情（已清洗，数值字段缺失时为 0）
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub symbol: String,
    pub company_name: String,
    pub business_date: String,
    pub close_price: f64,
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub previous_close: f64,
    pub average_price: f64,
    pub volume: f64,
    pub total_trades: f64,
    pub turnover: f64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    pub market_cap: f64,
    pub last_updated: String,
}

impl Record {
    /// 从 NEPSE today-price 的单条 JSON 构造记录
    ///
    /// 非对象或缺少 symbol 的条目返回 None，由调用方计数跳过。
    pub fn from_upstream(item: &Value) -> Option<Self> {
        let obj = item.as_object()?;
        let symbol = obj
            .get("symbol")
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())?;

        Some(Self {
            symbol,
            company_name: parse_string(obj.get("securityName"), MISSING_TEXT),
            business_date: parse_string(obj.get("businessDate"), MISSING_TEXT),
            close_price: parse_f64(obj.get("closePrice")),
            open_price: parse_f64(obj.get("openPrice")),
            high_price: parse_f64(obj.get("highPrice")),
            low_price: parse_f64(obj.get("lowPrice")),
            previous_close: parse_f64(obj.get("previousDayClosePrice")),
            average_price: parse_f64(obj.get("averageTradedPrice")),
            volume: parse_f64(obj.get("totalTradedQuantity")),
            total_trades: parse_f64(obj.get("totalTrades")),
            turnover: parse_f64(obj.get("totalTradedValue")),
            fifty_two_week_high: parse_f64(obj.get("fiftyTwoWeekHigh")),
            fifty_two_week_low: parse_f64(obj.get("fiftyTwoWeekLow")),
            market_cap: parse_f64(obj.get("marketCapitalization")),
            last_updated: parse_string(obj.get("lastUpdatedTime"), MISSING_TEXT),
        })
    }

    pub fn change(&self) -> f64 {
        self.close_price - self.previous_close
    }

    /// 昨收为 0 时返回 None，排行视图据此排除该记录
    pub fn change_percent(&self) -> Option<f64> {
        change_percent(self.close_price, self.previous_close)
    }
}
