use serde_json::Value;

/// 将 JSON Value 解析为 f64
///
/// 支持的输入类型：
/// - Number: 直接取 f64
/// - String: 去掉千分位逗号后解析
/// - 其他（null、缺失、非有限值）: 返回 0.0
pub fn parse_f64(v: Option<&Value>) -> f64 {
    let parsed = match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|f| f.is_finite()).unwrap_or(0.0)
}

/// 读取字符串字段，空串或缺失时使用 `default`
pub fn parse_string(v: Option<&Value>, default: &str) -> String {
    match v {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}
