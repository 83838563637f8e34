use std::io;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::LoggingConfig;
use crate::error::Error;

/// Initialize the logging system
///
/// Log lines go to stderr so that stdout only carries results. `RUST_LOG`
/// directives are honoured on top of the configured level.
pub fn init_logging(config: &LoggingConfig) -> Result<(), Error> {
    let filter = EnvFilter::from_default_env().add_directive(log_level(config).into());

    let result = if config.structured {
        let fmt_layer = fmt::Layer::default()
            .with_target(true)
            .with_writer(io::stderr)
            .json();
        Registry::default().with(filter).with(fmt_layer).try_init()
    } else {
        let fmt_layer = fmt::Layer::default()
            .with_target(false)
            .with_writer(io::stderr);
        Registry::default().with(filter).with(fmt_layer).try_init()
    };

    result.map_err(|e| Error::Config(format!("Failed to set global default subscriber: {}", e)))
}

/// Maximum level for the configured verbosity
pub fn log_level(config: &LoggingConfig) -> Level {
    if config.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    }
}

/// Create a test logging subscriber
#[cfg(test)]
pub fn init_test_logging() {
    let filter = EnvFilter::from_default_env().add_directive(Level::DEBUG.into());

    let fmt_layer = fmt::Layer::default()
        .with_test_writer()
        .with_target(true)
        .with_ansi(false);

    let _ = Registry::default().with(filter).with(fmt_layer).try_init();
}
