//! Tracing subscriber setup for the command-line tool

use crate::io::configuration::DEFAULT_LOG_FILTER;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive for a `--verbose` count
pub const fn filter_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => DEFAULT_LOG_FILTER,
        1 => "fractomosaic=info",
        2 => "fractomosaic=debug",
        _ => "fractomosaic=trace",
    }
}

/// Filter from `RUST_LOG` when set, otherwise from the verbosity level
pub fn build_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_for_verbosity(verbosity)))
}

/// Install the global subscriber writing to stderr
///
/// Returns `false` when a subscriber was already installed.
pub fn init(verbosity: u8) -> bool {
    tracing_subscriber::registry()
        .with(build_filter(verbosity))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init()
        .is_ok()
}
