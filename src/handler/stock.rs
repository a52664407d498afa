use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

use crate::api_models::stock::{
    DataResponse, LimitQuery, ListingResponse, RankRow, StockDetail,
};
use crate::app::AppState;
use crate::handler::error::AppError;
use crate::models::Snapshot;
use crate::services::market_view;
use crate::services::snapshot_cache::CachedSnapshot;
use crate::utils::time::response_timestamp;

const DEFAULT_LIMIT: usize = 10;

pub async fn get_stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<DataResponse<StockDetail>>, AppError> {
    let symbol = symbol.trim().to_uppercase();
    let cached = current_snapshot(&state).await?;
    let detail = market_view::detail(&cached.snapshot, &symbol)
        .ok_or_else(|| AppError::stock_not_found(&symbol))?;

    Ok(Json(DataResponse {
        success: true,
        timestamp: response_timestamp(),
        stale: cached.stale,
        data: detail,
    }))
}

pub async fn get_all_stocks(
    State(state): State<AppState>,
) -> Result<Json<ListingResponse>, AppError> {
    let cached = current_snapshot(&state).await?;
    let data = market_view::listing(&cached.snapshot);

    Ok(Json(ListingResponse {
        success: true,
        timestamp: response_timestamp(),
        stale: cached.stale,
        total_stocks: data.len(),
        data,
    }))
}

pub async fn get_gainers(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<RankRow>>>, AppError> {
    ranking(state, limit_query(query)?, market_view::top_gainers).await
}

pub async fn get_losers(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<RankRow>>>, AppError> {
    ranking(state, limit_query(query)?, market_view::top_losers).await
}

async fn ranking(
    state: AppState,
    query: LimitQuery,
    rank: fn(&Snapshot, usize) -> Vec<RankRow>,
) -> Result<Json<DataResponse<Vec<RankRow>>>, AppError> {
    let limit = parse_limit(query.limit.as_deref())?;
    let cached = current_snapshot(&state).await?;
    let data = rank(&cached.snapshot, limit);

    Ok(Json(DataResponse {
        success: true,
        timestamp: response_timestamp(),
        stale: cached.stale,
        data,
    }))
}

async fn current_snapshot(state: &AppState) -> Result<CachedSnapshot, AppError> {
    let cached = state.cache.get_snapshot().await?;
    if cached.stale {
        tracing::warn!(
            fetched_at = %cached.snapshot.fetched_at(),
            "上游不可用，返回过期快照"
        );
    }
    Ok(cached)
}

fn limit_query(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<LimitQuery, AppError> {
    let Query(pairs) = query.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    Ok(LimitQuery::from_pairs(pairs))
}

/// 缺省或非整数时用默认值 10，负数视为调用方错误
fn parse_limit(raw: Option<&str>) -> Result<usize, AppError> {
    let Some(value) = raw.map(str::trim).and_then(|s| s.parse::<i64>().ok()) else {
        return Ok(DEFAULT_LIMIT);
    };
    if value < 0 {
        return Err(AppError::BadRequest(
            "limit must be a non-negative integer".to_string(),
        ));
    }
    Ok(usize::try_from(value).unwrap_or(usize::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_validation() {
        assert_eq!(parse_limit(None).unwrap(), 10);
        assert_eq!(parse_limit(Some("abc")).unwrap(), 10);
        assert_eq!(parse_limit(Some("")).unwrap(), 10);
        assert_eq!(parse_limit(Some(" 5 ")).unwrap(), 5);
        assert_eq!(parse_limit(Some("0")).unwrap(), 0);
        assert!(matches!(
            parse_limit(Some("-1")),
            Err(AppError::BadRequest(_))
        ));
    }
}
