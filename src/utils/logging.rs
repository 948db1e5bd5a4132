//! Logging utilities
//!
//! Provides logging setup and configuration.

use env_logger::{Builder, Env};

/// Setup logging for the storage tools.
///
/// `RUST_LOG` wins; without it only warnings and errors are shown. Calling
/// this twice is harmless.
pub fn setup_logging() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .try_init();
}
