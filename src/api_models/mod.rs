pub mod stock;

#[allow(unused_imports)]
pub use stock::{
    DataResponse, LimitQuery, ListingResponse, ListingRow, PriceInfo, RankRow, StockDetail,
    TradingInfo, YearRange,
};
