//! Tracing setup.
//!
//! The shell owns the screen, so log lines must not be interleaved with it.
//! With a log file configured everything the filter admits goes there;
//! without one only warnings and errors reach stderr.

use crate::config::Config;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "cinema=info,cinema_core=info,cinema_runtime=info";

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init(config: &Config) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            registry
                .with(fmt::layer().with_writer(io::stderr.with_max_level(Level::WARN)))
                .init();
        }
    }
    Ok(())
}
