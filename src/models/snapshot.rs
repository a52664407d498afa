use chrono::{DateTime, Utc};
use serde_json::Value;

use super::record::Record;

/// 一次成功抓取得到的全市场行情快照，创建后不可变
#[derive(Debug, Clone)]
pub struct Snapshot {
    records: Vec<Record>,
    skipped: usize,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// 清洗上游原始条目：保留顺序，丢弃无法识别的条目并计数
    pub fn ingest(raw: &[Value], fetched_at: DateTime<Utc>) -> Self {
        let mut records = Vec::with_capacity(raw.len());
        let mut skipped = 0;
        for item in raw {
            match Record::from_upstream(item) {
                Some(rec) => records.push(rec),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::warn!(
                skipped,
                kept = records.len(),
                "快照清洗时丢弃了缺少 symbol 的记录"
            );
        }

        Self {
            records,
            skipped,
            fetched_at,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ingest_keeps_order_and_counts_skips() {
        let raw = vec![
            json!({"symbol": "NABIL", "closePrice": 1000}),
            json!({"securityName": "no symbol"}),
            json!(null),
            json!({"symbol": "chl", "closePrice": 500}),
        ];

        let snap = Snapshot::ingest(&raw, Utc::now());
        let symbols: Vec<&str> = snap.records().iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["NABIL", "CHL"]);
        assert_eq!(snap.skipped(), 2);
        assert_eq!(snap.len() + snap.skipped(), raw.len());
    }

    #[test]
    fn clean_payload_has_no_skips() {
        let raw = vec![json!({"symbol": "A"}), json!({"symbol": "B"})];
        let snap = Snapshot::ingest(&raw, Utc::now());
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.skipped(), 0);
    }
}
