//! # Cinema
//!
//! Interactive terminal for the seat reservations of a single cinema room.
//!
//! The binary wires a [`TheaterStore`] to a [`CrosstermTerminal`] and runs
//! the [`Shell`] menu loop. Everything is reachable from this library so the
//! shell can be driven by a [`ScriptedTerminal`] in tests.

pub mod config;
pub mod render;
pub mod shell;
pub mod telemetry;
pub mod terminal;

use cinema_core::{TheaterAction, TheaterEnvironment, TheaterReducer, TheaterState};
use cinema_runtime::Store;

/// Store running the theater reducer
pub type TheaterStore = Store<TheaterState, TheaterAction, TheaterEnvironment, TheaterReducer>;

pub use config::Config;
pub use shell::{MenuChoice, Shell, ShellError, theater_store};
pub use terminal::{Color, CrosstermTerminal, ScriptedTerminal, Terminal};
