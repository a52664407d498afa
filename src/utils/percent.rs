/// 保留两位小数，四舍五入（远离零方向），所有视图统一使用
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    // 避免输出 -0.0
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// 涨跌幅（百分比），昨收为 0 时无意义，返回 None
pub fn change_percent(close: f64, previous_close: f64) -> Option<f64> {
    if previous_close == 0.0 {
        return None;
    }
    Some((close - previous_close) / previous_close * 100.0)
}
