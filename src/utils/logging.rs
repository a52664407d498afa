use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, fmt};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use chrono::Utc;
use chrono_tz::Asia::Kathmandu;

/// 日志时间使用交易所所在时区 (Asia/Kathmandu, UTC+5:45)
struct ExchangeTime;

impl FormatTime for ExchangeTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Utc::now().with_timezone(&Kathmandu);
        write!(w, "{}", now.format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info,axum=info"));

    // 控制台输出层（始终启用）
    let console_layer = fmt::layer()
        .with_timer(ExchangeTime)
        .with_target(true)
        .with_thread_ids(true)
        .with_line_number(true);

    let log_to_file = std::env::var("LOG_TO_FILE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if log_to_file {
        let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string());

        // 按天轮转日志文件
        let file_appender = RollingFileAppender::new(
            Rotation::DAILY,
            &log_dir,
            "nepse-stock-api.log"
        );

        let file_layer = fmt::layer()
            .with_timer(ExchangeTime)
            .with_writer(file_appender)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
    }
}
