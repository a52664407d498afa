//! 行情派生视图：个股详情、全量列表、涨幅榜、跌幅榜
//!
//! 全部是纯函数，只读取调用方持有的同一个快照，不做任何 I/O。

use crate::api_models::stock::{
    ListingRow, PriceInfo, RankRow, StockDetail, TradingInfo, YearRange,
};
use crate::models::{Record, Snapshot};
use crate::utils::percent::round2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RankOrder {
    Gainers,
    Losers,
}

/// 按代码查找个股（不区分大小写），重复代码时取快照中的第一条
pub fn detail(snapshot: &Snapshot, symbol: &str) -> Option<StockDetail> {
    let wanted = symbol.trim().to_uppercase();
    snapshot
        .records()
        .iter()
        .find(|r| r.symbol == wanted)
        .map(to_detail)
}

/// 全量列表，保持快照顺序
pub fn listing(snapshot: &Snapshot) -> Vec<ListingRow> {
    snapshot
        .records()
        .iter()
        .map(|r| ListingRow {
            symbol: r.symbol.clone(),
            company_name: r.company_name.clone(),
            close_price: r.close_price,
            change: round2(r.change()),
            change_percent: round2(r.change_percent().unwrap_or(0.0)),
            volume: r.volume,
        })
        .collect()
}

pub fn top_gainers(snapshot: &Snapshot, limit: usize) -> Vec<RankRow> {
    ranked(snapshot, limit, RankOrder::Gainers)
}

pub fn top_losers(snapshot: &Snapshot, limit: usize) -> Vec<RankRow> {
    ranked(snapshot, limit, RankOrder::Losers)
}

/// 排行：排除昨收为 0 的记录，按未取整的涨跌幅稳定排序后截断
fn ranked(snapshot: &Snapshot, limit: usize, order: RankOrder) -> Vec<RankRow> {
    if limit == 0 {
        return Vec::new();
    }

    let mut candidates: Vec<(&Record, f64)> = snapshot
        .records()
        .iter()
        .filter_map(|r| r.change_percent().map(|pct| (r, pct)))
        .collect();

    // sort_by 是稳定排序，相同涨跌幅保持快照顺序
    match order {
        RankOrder::Gainers => candidates.sort_by(|a, b| b.1.total_cmp(&a.1)),
        RankOrder::Losers => candidates.sort_by(|a, b| a.1.total_cmp(&b.1)),
    }

    candidates
        .into_iter()
        .take(limit)
        .map(|(r, pct)| RankRow {
            symbol: r.symbol.clone(),
            company_name: r.company_name.clone(),
            close_price: r.close_price,
            change_percent: round2(pct),
        })
        .collect()
}

fn to_detail(r: &Record) -> StockDetail {
    StockDetail {
        symbol: r.symbol.clone(),
        company_name: r.company_name.clone(),
        business_date: r.business_date.clone(),
        price: PriceInfo {
            current: r.close_price,
            open: r.open_price,
            high: r.high_price,
            low: r.low_price,
            previous_close: r.previous_close,
            change: round2(r.change()),
            change_percent: round2(r.change_percent().unwrap_or(0.0)),
            average_price: r.average_price,
        },
        trading: TradingInfo {
            volume: r.volume,
            total_trades: r.total_trades,
            turnover: r.turnover,
        },
        year_range: YearRange {
            high_52_week: r.fifty_two_week_high,
            low_52_week: r.fifty_two_week_low,
        },
        market_cap: r.market_cap,
        last_updated: r.last_updated.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::{json, Value};

    fn snapshot_of(raw: Vec<Value>) -> Snapshot {
        Snapshot::ingest(&raw, Utc::now())
    }

    fn quote(symbol: &str, close: f64, prev: f64) -> Value {
        json!({
            "symbol": symbol,
            "securityName": format!("{symbol} Ltd"),
            "closePrice": close,
            "previousDayClosePrice": prev,
            "totalTradedQuantity": 100,
        })
    }

    fn market() -> Snapshot {
        snapshot_of(vec![
            quote("NABIL", 1000.0, 950.0),
            quote("CHL", 500.0, 600.0),
            quote("NEWIPO", 120.0, 0.0),
            quote("UPPER", 220.0, 200.0),
            quote("FLAT", 300.0, 300.0),
        ])
    }

    #[test]
    fn gainers_and_losers_match_reference_example() {
        let snap = snapshot_of(vec![quote("NABIL", 1000.0, 950.0), quote("CHL", 500.0, 600.0)]);

        let gainers = top_gainers(&snap, 1);
        assert_eq!(gainers.len(), 1);
        assert_eq!(gainers[0].symbol, "NABIL");
        assert_eq!(gainers[0].change_percent, 5.26);

        let losers = top_losers(&snap, 1);
        assert_eq!(losers.len(), 1);
        assert_eq!(losers[0].symbol, "CHL");
        assert_eq!(losers[0].change_percent, -16.67);
    }

    #[test]
    fn zero_previous_close_is_listed_but_never_ranked() {
        let snap = market();

        let row = listing(&snap)
            .into_iter()
            .find(|r| r.symbol == "NEWIPO")
            .unwrap();
        assert_eq!(row.change_percent, 0.0);
        assert_eq!(row.change, 120.0);

        let all = snap.len();
        assert!(top_gainers(&snap, all).iter().all(|r| r.symbol != "NEWIPO"));
        assert!(top_losers(&snap, all).iter().all(|r| r.symbol != "NEWIPO"));
        assert_eq!(top_gainers(&snap, all).len(), all - 1);
    }

    #[test]
    fn rankings_are_monotonic() {
        let snap = market();
        let gainers = top_gainers(&snap, 10);
        assert!(gainers
            .windows(2)
            .all(|w| w[0].change_percent >= w[1].change_percent));
        let losers = top_losers(&snap, 10);
        assert!(losers
            .windows(2)
            .all(|w| w[0].change_percent <= w[1].change_percent));
        assert_eq!(gainers[0].symbol, "UPPER");
    }

    #[test]
    fn ties_keep_snapshot_order() {
        let snap = snapshot_of(vec![
            quote("B", 110.0, 100.0),
            quote("A", 220.0, 200.0),
            quote("C", 330.0, 300.0),
        ]);
        let order: Vec<String> = top_gainers(&snap, 3).into_iter().map(|r| r.symbol).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
        let order: Vec<String> = top_losers(&snap, 3).into_iter().map(|r| r.symbol).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn zero_limit_is_empty() {
        assert!(top_gainers(&market(), 0).is_empty());
        assert!(top_losers(&market(), 0).is_empty());
    }

    #[test]
    fn detail_lookup_is_case_insensitive() {
        let snap = market();
        let d = detail(&snap, "nabil").unwrap();
        assert_eq!(d.symbol, "NABIL");
        assert_eq!(d.price.current, 1000.0);
        assert_eq!(d.price.previous_close, 950.0);
        assert_eq!(d.price.change, 50.0);
        assert_eq!(d.price.change_percent, 5.26);
        assert_eq!(d.last_updated, "N/A");
        assert!(detail(&snap, "MISSING").is_none());
    }

    #[test]
    fn detail_prefers_first_duplicate() {
        let snap = snapshot_of(vec![quote("DUP", 10.0, 9.0), quote("DUP", 20.0, 9.0)]);
        assert_eq!(detail(&snap, "dup").unwrap().price.current, 10.0);
    }

    #[test]
    fn listing_keeps_snapshot_order_and_drops_symbolless_rows() {
        let raw = vec![
            quote("ZZZ", 1.0, 1.0),
            json!({"closePrice": 5}),
            quote("AAA", 2.0, 1.0),
        ];
        let snap = snapshot_of(raw.clone());
        let rows = listing(&snap);
        assert!(rows.len() <= raw.len());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].symbol, "ZZZ");
        assert_eq!(rows[1].symbol, "AAA");
        assert_eq!(rows[1].change_percent, 100.0);
    }

    #[test]
    fn views_are_idempotent() {
        let snap = market();
        assert_eq!(listing(&snap), listing(&snap));
        assert_eq!(top_gainers(&snap, 3), top_gainers(&snap, 3));
        assert_eq!(top_losers(&snap, 3), top_losers(&snap, 3));
        assert_eq!(detail(&snap, "CHL"), detail(&snap, "CHL"));
    }
}
