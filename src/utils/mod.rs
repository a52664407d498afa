pub mod config;
pub mod logging;
pub mod middleware;
pub mod percent;
pub mod number_parser;
pub mod http_client;
pub mod time;
