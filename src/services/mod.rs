pub mod market_view;
pub mod nepse_source;
pub mod snapshot_cache;
