//! Telemetry
//!
//! Structured logging setup for the service.
//! - `RUST_LOG` overrides the configured filter
//! - compact or JSON output, always on stderr
//!
//! Per-request spans come from `tower_http::trace::TraceLayer` at `debug`.

use std::sync::Once;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, LoggingConfig};

/// Initialize the global subscriber from logging config. Later calls are
/// no-ops.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.filter.clone());
    init_tracing_with_filter(&filter, config.format);
}

/// Initialize with a custom filter string
pub fn init_tracing_with_filter(filter: &str, format: LogFormat) {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let filter_layer = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
        let registry = tracing_subscriber::registry().with(filter_layer);

        let result = match format {
            LogFormat::Compact => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_level(true)
                        .compact()
                        .with_writer(std::io::stderr),
                )
                .try_init(),
            LogFormat::Json => registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_current_span(false)
                        .with_writer(std::io::stderr),
                )
                .try_init(),
        };
        if let Err(e) = result {
            eprintln!("tracing already initialized: {}", e);
        }
    });
}
