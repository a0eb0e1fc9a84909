use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// `RUST_LOG` 優先，其次是設定檔的等級
fn default_filter(level: Option<&str>, verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| match (verbose, level) {
        (true, _) => EnvFilter::new("fantasy_booking=debug,info"),
        (false, Some(level)) => EnvFilter::new(format!("fantasy_booking={}", level)),
        (false, None) => EnvFilter::new("fantasy_booking=info"),
    })
}

pub fn init_cli_logger(level: Option<&str>, verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(level: Option<&str>, verbose: bool) {
    tracing_subscriber::registry()
        .with(default_filter(level, verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .with_writer(std::io::stderr)
                .json(), // 給日誌收集器用的結構化輸出
        )
        .init();
}

/// 依設定檔的 `logging.format` 選擇輸出格式
pub fn init_logger(format: &str, level: Option<&str>, verbose: bool) {
    match format {
        "json" => init_json_logger(level, verbose),
        _ => init_cli_logger(level, verbose),
    }
}
