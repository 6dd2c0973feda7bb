//! Interactive menu shell.
//!
//! Reads choices and seat coordinates from a [`Terminal`], dispatches
//! reservation commands through the [`TheaterStore`] and draws the outcome.

use crate::config::Config;
use crate::render::{self, PROMPT_X};
use crate::terminal::Terminal;
use crate::TheaterStore;
use cinema_core::{
    FareType, ReportEngine, ReservationError, ReservationService, TheaterAction,
    TheaterEnvironment, TheaterReducer, TheaterState,
};
use cinema_runtime::StoreError;
use thiserror::Error;

/// Lines of the detailed report shown before asking for more
pub const REPORT_PAGE_LINES: u16 = 18;

/// First row of report listings
const LIST_Y: u16 = 5;

/// Errors that end a shell session
#[derive(Error, Debug)]
pub enum ShellError {
    /// The terminal failed or its input was closed
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The reservation store became unusable
    #[error("Store failed: {0}")]
    Store(#[from] StoreError),
}

/// Entries of the main menu
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// Reserve a seat
    Reserve,
    /// Cancel a reservation
    Cancel,
    /// Totals and occupancy
    SimpleReport,
    /// One line per occupied seat
    DetailedReport,
    /// Occupancy bar chart
    Chart,
    /// Leave the program
    Exit,
}

impl MenuChoice {
    /// Maps a menu key to its entry
    #[must_use]
    pub const fn from_key(key: char) -> Option<Self> {
        match key {
            '1' => Some(Self::Reserve),
            '2' => Some(Self::Cancel),
            '3' => Some(Self::SimpleReport),
            '4' => Some(Self::DetailedReport),
            '5' => Some(Self::Chart),
            '6' => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Parses the column typed by the user.
///
/// Only the numeric form is checked here; range checks belong to the core.
#[must_use]
pub fn parse_column(input: &str) -> Option<i32> {
    input.trim().parse().ok()
}

/// Converts a fare key press to its menu code; non-digits map to `0`
#[must_use]
pub fn fare_code(key: char) -> u8 {
    key.to_digit(10)
        .and_then(|digit| u8::try_from(digit).ok())
        .unwrap_or(0)
}

/// Short message shown for a rejected command
#[must_use]
pub const fn rejection_message(error: &ReservationError) -> &'static str {
    match error {
        ReservationError::InvalidCoordinate { .. } | ReservationError::OutOfRange { .. } => {
            "Invalid seat!"
        }
        ReservationError::AlreadyOccupied(_) => "Seat already occupied!",
        ReservationError::SeatNotOccupied(_) => "Seat is free!",
        ReservationError::InvalidFareType(_) => "Invalid fare type!",
        ReservationError::PcdRequiresHalfFare(_) => "PCD: half fare only!",
    }
}

/// The menu loop and its screens
pub struct Shell<T: Terminal> {
    terminal: T,
    store: TheaterStore,
    service: ReservationService,
    config: Config,
}

impl<T: Terminal> Shell<T> {
    /// Creates a shell over a terminal and a store
    #[must_use]
    pub fn new(terminal: T, store: TheaterStore, config: Config) -> Self {
        let service = ReservationService::new(store.environment().clone());
        Self {
            terminal,
            store,
            service,
            config,
        }
    }

    /// Returns the terminal
    #[must_use]
    pub const fn terminal(&self) -> &T {
        &self.terminal
    }

    /// Consumes the shell and returns its terminal
    #[must_use]
    pub fn into_terminal(self) -> T {
        self.terminal
    }

    /// Runs the menu loop until the user exits.
    ///
    /// The cursor is hidden while the loop runs and restored afterwards,
    /// whether the loop ended normally or with an error.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::Io`] if the terminal fails or runs out of input,
    /// and [`ShellError::Store`] if the store lock was poisoned.
    pub fn run(&mut self) -> Result<(), ShellError> {
        tracing::info!(title = %self.config.title, "Shell started");
        let window_title = format!("{} - Reservation Management", self.config.title);
        self.terminal.set_title(&window_title)?;
        self.terminal.set_cursor_visible(false)?;

        let result = self.menu_loop();

        self.terminal.reset_color()?;
        self.terminal.set_cursor_visible(true)?;
        self.terminal.flush()?;

        match &result {
            Ok(()) => tracing::info!("Shell exited"),
            Err(error) => tracing::warn!(%error, "Shell aborted"),
        }
        result
    }

    fn menu_loop(&mut self) -> Result<(), ShellError> {
        loop {
            let state = self.store.state(TheaterState::clone)?;
            render::main_screen(&mut self.terminal, &state, &self.config)?;

            let key = self.terminal.read_key()?;
            self.terminal.write(&key.to_string())?;

            match MenuChoice::from_key(key) {
                Some(MenuChoice::Reserve) => self.reserve()?,
                Some(MenuChoice::Cancel) => self.cancel()?,
                Some(MenuChoice::SimpleReport) => self.simple_report()?,
                Some(MenuChoice::DetailedReport) => self.detailed_report()?,
                Some(MenuChoice::Chart) => self.chart()?,
                Some(MenuChoice::Exit) => {
                    render::farewell(&mut self.terminal, &self.config)?;
                    self.terminal.read_key()?;
                    return Ok(());
                }
                None => {
                    tracing::debug!(?key, "Invalid menu choice");
                    self.terminal.clear()?;
                    render::centered(&mut self.terminal, "Invalid option! Try again.", 12)?;
                    self.terminal.pause(self.config.invalid_choice_delay)?;
                }
            }
        }
    }

    /// Shows `message` and waits for a key
    fn notify(&mut self, y: u16, message: &str) -> Result<(), ShellError> {
        self.terminal.write_at(PROMPT_X, y, message)?;
        self.terminal.read_key()?;
        Ok(())
    }

    /// Draws the seat map under `title` and reads a row and a column.
    ///
    /// Returns `None` if the column was not a number; the user has already
    /// been told.
    fn read_seat_coordinate(&mut self, title: &str) -> Result<Option<(char, i32)>, ShellError> {
        self.terminal.clear()?;
        render::centered(&mut self.terminal, title, 2)?;
        let state = self.store.state(TheaterState::clone)?;
        render::seat_map(&mut self.terminal, state.grid())?;

        self.terminal.write_at(PROMPT_X, 18, "Row (A-H): ")?;
        let row = self.terminal.read_key()?.to_ascii_uppercase();
        self.terminal.write(&row.to_string())?;

        self.terminal.write_at(PROMPT_X, 19, "Column (1-12): ")?;
        let input = self.terminal.read_line()?;
        let Some(column) = parse_column(&input) else {
            tracing::debug!(%input, "Malformed column");
            self.notify(21, "Invalid input!")?;
            return Ok(None);
        };
        Ok(Some((row, column)))
    }

    fn read_fare_choice(&mut self) -> Result<Result<FareType, ReservationError>, ShellError> {
        self.terminal.write_at(
            PROMPT_X,
            21,
            &format!(
                "Fare: 1-Full ({}) 2-Half ({}): ",
                render::money(&self.config, FareType::Full.price()),
                render::money(&self.config, FareType::Half.price()),
            ),
        )?;
        let key = self.terminal.read_key()?;
        self.terminal.write(&key.to_string())?;
        Ok(FareType::from_code(fare_code(key)))
    }

    fn reserve(&mut self) -> Result<(), ShellError> {
        let Some((row, column)) = self.read_seat_coordinate("RESERVE SEAT")? else {
            return Ok(());
        };

        let service = &self.service;
        if let Err(error) = self
            .store
            .state(|state| service.check_seat_available(state, row, column))?
        {
            return self.notify(21, rejection_message(&error));
        }

        let fare = match self.read_fare_choice()? {
            Ok(fare) => fare,
            Err(error) => return self.notify(23, rejection_message(&error)),
        };

        let outcome = self
            .store
            .send(TheaterAction::ReserveSeat { row, column, fare })?
            .into_iter()
            .find_map(TheaterAction::into_reservation);

        match outcome {
            Some(Ok(reservation)) => {
                self.terminal.write_at(
                    PROMPT_X,
                    25,
                    &format!(
                        "Reservation confirmed! {} - {} - {}",
                        reservation.seat,
                        reservation.fare,
                        render::money(&self.config, reservation.price)
                    ),
                )?;
                self.notify(26, "Press any key...")
            }
            Some(Err(error)) => self.notify(23, rejection_message(&error)),
            None => Ok(()),
        }
    }

    fn cancel(&mut self) -> Result<(), ShellError> {
        let Some((row, column)) = self.read_seat_coordinate("CANCEL RESERVATION")? else {
            return Ok(());
        };

        let outcome = self
            .store
            .send(TheaterAction::CancelReservation { row, column })?
            .into_iter()
            .find_map(TheaterAction::into_refund);

        match outcome {
            Some(Ok(refund)) => {
                self.terminal.write_at(
                    PROMPT_X,
                    21,
                    &format!(
                        "Cancelled! Refunded: {}",
                        render::money(&self.config, refund.amount)
                    ),
                )?;
                self.notify(22, "Press any key...")
            }
            Some(Err(error)) => self.notify(21, rejection_message(&error)),
            None => Ok(()),
        }
    }

    fn simple_report(&mut self) -> Result<(), ShellError> {
        self.terminal.clear()?;
        render::centered(&mut self.terminal, "SIMPLE REPORT", 2)?;
        let summary = self.store.state(|state| ReportEngine::new(state).summary())?;
        render::summary(&mut self.terminal, &summary, &self.config)?;
        self.notify(15, "Press any key...")
    }

    fn detailed_report(&mut self) -> Result<(), ShellError> {
        self.terminal.clear()?;
        render::centered(&mut self.terminal, "DETAILED REPORT", 2)?;
        let lines: Vec<String> = self.store.state(|state| {
            ReportEngine::new(state)
                .itemized_occupied()
                .map(|item| render::seat_line(&item))
                .collect()
        })?;

        let mut y = LIST_Y;
        for line in &lines {
            self.terminal.write_at(PROMPT_X, y, line)?;
            y += 1;
            if y >= LIST_Y + REPORT_PAGE_LINES {
                self.notify(24, "More...")?;
                self.terminal.clear()?;
                render::centered(&mut self.terminal, "Continued", 2)?;
                y = LIST_Y;
            }
        }

        if lines.is_empty() {
            self.terminal.write_at(PROMPT_X, LIST_Y, "No seats occupied.")?;
        } else {
            self.terminal
                .write_at(PROMPT_X, y + 1, &format!("Total: {}", lines.len()))?;
        }
        self.notify(23, "Press any key...")
    }

    fn chart(&mut self) -> Result<(), ShellError> {
        self.terminal.clear()?;
        render::centered(&mut self.terminal, "OCCUPANCY CHART", 2)?;
        let width = self.config.bar_width;
        let (summary, chart) = self.store.state(|state| {
            let engine = ReportEngine::new(state);
            (engine.summary(), engine.bar_chart_with_scale(width))
        })?;
        render::bar_chart(&mut self.terminal, &summary, &chart)?;
        self.notify(20, "Press any key...")
    }
}

/// Creates the shell's store
#[must_use]
pub fn theater_store(environment: TheaterEnvironment, config: &Config) -> TheaterStore {
    TheaterStore::with_config(
        TheaterState::new(),
        TheaterReducer::new(),
        environment,
        cinema_runtime::StoreConfig::new(config.journal_capacity),
    )
}
