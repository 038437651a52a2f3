//! Tracing subscriber setup

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init_logger(default_level: &str) -> anyhow::Result<()> {
    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .with(filter_layer)
        .try_init()?;

    Ok(())
}
