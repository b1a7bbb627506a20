//! Logging infrastructure for readalign.
//!
//! This module provides:
//! - Per-session edit loggers with file + UI callback dual output
//! - A tail buffer for showing recent activity
//! - Integration with the `tracing` ecosystem
//!
//! # Example
//!
//! ```no_run
//! use readalign_core::logging::{LogConfig, SessionLogger};
//!
//! let logger = SessionLogger::new(
//!     "chapter1",
//!     ".logs",
//!     LogConfig::default(),
//!     None,
//! ).unwrap();
//!
//! logger.info("session started");
//! logger.edit("split fragment 'f1' at 2.500s");
//! ```

mod session;
mod types;

pub use session::SessionLogger;
pub use types::{LogConfig, LogLevel, UiLogCallback};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber for application-wide logging.
///
/// Respects the `RUST_LOG` environment variable, falling back to the
/// provided default level. Outputs to stderr. Should be called once at
/// application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Info), "info");
    }
}
