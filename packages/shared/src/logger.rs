//! Logging setup utilities for the Tsudoi binaries.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber with the specified default log level.
///
/// Filters are applied to the `tsudoi_*` library crates and to the binary
/// itself. The level can be overridden using the `RUST_LOG` environment variable.
///
/// # Arguments
///
/// * `binary_name` - The name of the binary (e.g., "tsudoi-server", "tsudoi-client")
/// * `default_log_level` - The default log level (e.g., "debug", "info", "warn", "error")
///
/// # Examples
///
/// ```no_run
/// use tsudoi_shared::logger::setup_logger;
///
/// setup_logger("tsudoi-server", "debug");
/// ```
pub fn setup_logger(binary_name: &str, default_log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(binary_name, default_log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn default_filter(binary_name: &str, default_log_level: &str) -> String {
    [
        "tsudoi_shared",
        "tsudoi_server",
        "tsudoi_client",
        "tower_http",
        &binary_name.replace('-', "_"),
    ]
    .iter()
    .map(|target| format!("{}={}", target, default_log_level))
    .collect::<Vec<_>>()
    .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_covers_library_crates_and_binary() {
        // テスト項目: デフォルトフィルタにライブラリとバイナリの両方が含まれる
        // given (前提条件):
        let binary_name = "tsudoi-server";

        // when (操作):
        let filter = default_filter(binary_name, "debug");

        // then (期待する結果):
        assert!(filter.contains("tsudoi_server=debug"));
        assert!(filter.contains("tsudoi_client=debug"));
        assert!(filter.ends_with("tsudoi_server=debug"));
        assert!(!filter.contains('-'));
    }
}
