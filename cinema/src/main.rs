//! Cinema reservation terminal
//!
//! Run with `cargo run -p cinema`. Settings come from the environment or a
//! `.env` file; see `cinema::config`.

use cinema::{Config, CrosstermTerminal, Shell, telemetry, theater_store};
use cinema_core::TheaterEnvironment;
use cinema_core::environment::SystemClock;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    telemetry::init(&config)?;

    tracing::info!(
        title = %config.title,
        journal_capacity = config.journal_capacity,
        "Starting cinema terminal"
    );

    let store = theater_store(TheaterEnvironment::new(Arc::new(SystemClock)), &config);
    let mut shell = Shell::new(CrosstermTerminal::new(), store.clone(), config);
    shell.run()?;

    let sold = store.state(|state| state.ledger().total_clients())?;
    let journaled = store.journal()?.len();
    tracing::info!(sold, journaled, "Session finished");
    Ok(())
}
