use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Fallback filter for human-readable output: request spans from tower_http
/// plus one event per directory check from `service`.
pub const COMPACT_DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";

/// Fallback filter for JSON output. Request spans are noisy in a log shipper
/// and the report event already carries dir/uid/outcome.
pub const JSON_DEFAULT_FILTER: &str = "info,service=info,tower_http=warn";

fn filter_or(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Compact, human-readable events on stdout. `RUST_LOG` overrides
/// [`COMPACT_DEFAULT_FILTER`].
pub fn init_logging_default() {
    let _ = fmt()
        .with_env_filter(filter_or(COMPACT_DEFAULT_FILTER))
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// One JSON object per event on stdout. `RUST_LOG` overrides
/// [`JSON_DEFAULT_FILTER`].
///
/// Targets are kept so `service::checker` events can be told apart from
/// request spans; the span list ties each check to its request.
pub fn init_logging_json() {
    // 例如 RUST_LOG=warn,service=debug 只保留检查结果
    let _ = fmt()
        .with_env_filter(filter_or(JSON_DEFAULT_FILTER))
        .with_target(true)
        .json()
        .with_current_span(false)
        .with_span_list(true)
        .with_writer(io::stdout)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filters_parse() {
        assert!(EnvFilter::try_new(COMPACT_DEFAULT_FILTER).is_ok());
        assert!(EnvFilter::try_new(JSON_DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging_json();
        init_logging_default();
        init_logging_json();
    }
}
