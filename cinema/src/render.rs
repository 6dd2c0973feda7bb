//! Screen drawing.
//!
//! Pure functions of the state and config; every function positions its
//! own output and leaves the color at [`Color::White`].

use crate::config::Config;
use crate::terminal::{Color, Terminal};
use cinema_core::{
    BarChart, FULL_PRICE, HALF_PRICE, Money, ReservationLedger, Row, SeatDescriptor, SeatGrid,
    Summary, TheaterState,
};
use std::io;

/// Center column of the 80-column layout
const CENTER: u16 = 40;

/// Top-left corner of the seat map
const MAP_X: u16 = 30;
const MAP_Y: u16 = 10;

/// Column of prompts and messages
pub const PROMPT_X: u16 = 25;

/// Formats an amount with the configured currency symbol
#[must_use]
pub fn money(config: &Config, amount: Money) -> String {
    format!("{} {amount}", config.currency)
}

/// Writes `text` centered on row `y`
///
/// # Errors
///
/// Propagates terminal I/O errors.
pub fn centered<T: Terminal>(term: &mut T, text: &str, y: u16) -> io::Result<()> {
    let half = u16::try_from(text.chars().count() / 2).unwrap_or(CENTER);
    term.write_at(CENTER.saturating_sub(half), y, text)
}

fn boxed<T: Terminal>(term: &mut T, x: u16, y: u16, text: &str) -> io::Result<()> {
    let width = text.chars().count() + 2;
    term.write_at(x, y, &format!("╔{}╗", "═".repeat(width)))?;
    term.write_at(x, y + 1, &format!("║ {text} ║"))?;
    term.write_at(x, y + 2, &format!("╚{}╝", "═".repeat(width)))
}

/// Main screen: header, seat map, legend and status bar
///
/// # Errors
///
/// Propagates terminal I/O errors.
pub fn main_screen<T: Terminal>(
    term: &mut T,
    state: &TheaterState,
    config: &Config,
) -> io::Result<()> {
    term.clear()?;
    term.set_color(Color::White)?;
    boxed(term, 20, 0, &format!("{} - Reservation Management", config.title))?;

    term.set_color(Color::Cyan)?;
    boxed(term, 35, 5, "             S C R E E N            ")?;
    term.set_color(Color::White)?;
    seat_map(term, state.grid())?;

    legend(term, config)?;
    status_bar(term, state.ledger(), config)?;

    term.write_at(
        20,
        27,
        "1-Reserve  2-Cancel  3-Simple report  4-Detailed report  5-Chart  6-Exit",
    )?;
    term.write_at(CENTER, 29, "Choice: ")
}

/// Seat map with column numbers above and row letters on the left
///
/// # Errors
///
/// Propagates terminal I/O errors.
pub fn seat_map<T: Terminal>(term: &mut T, grid: &SeatGrid) -> io::Result<()> {
    let header: String = (1..=cinema_core::COLUMNS).map(|c| format!(" {c:2}")).collect();
    term.write_at(MAP_X + 3, MAP_Y - 1, &header)?;

    for (y, row) in (MAP_Y..).zip(Row::all()) {
        term.write_at(MAP_X, y, &format!("{row} "))?;
        for (x, seat) in (MAP_X + 3..).step_by(3).zip(grid.row(row)) {
            let (color, symbol) = if seat.is_occupied() {
                (Color::Red, "[X]")
            } else if seat.is_pcd() {
                (Color::Yellow, "[P]")
            } else {
                (Color::Green, "[ ]")
            };
            term.set_color(color)?;
            term.write_at(x, y, symbol)?;
        }
    }
    term.set_color(Color::White)
}

fn legend<T: Terminal>(term: &mut T, config: &Config) -> io::Result<()> {
    let entries = [
        (Color::Green, "[ ]", " Free"),
        (Color::Red, "[X]", " Occupied"),
        (Color::Yellow, "[P]", " PCD (row A)"),
    ];
    for (y, (color, symbol, label)) in (19..).zip(entries) {
        term.set_color(color)?;
        term.write_at(22, y, symbol)?;
        term.set_color(Color::White)?;
        term.write(label)?;
    }

    term.set_color(Color::Grey)?;
    term.write_at(
        22,
        22,
        &format!(
            "Full: {} | Half: {}",
            money(config, FULL_PRICE),
            money(config, HALF_PRICE)
        ),
    )?;
    term.set_color(Color::White)
}

fn status_bar<T: Terminal>(
    term: &mut T,
    ledger: &ReservationLedger,
    config: &Config,
) -> io::Result<()> {
    boxed(
        term,
        20,
        23,
        &format!(
            "Clients: {:3} | Full: {:3} | Half: {:3} | PCD: {:3} | Total: {}",
            ledger.total_clients(),
            ledger.full_fare_count(),
            ledger.half_fare_count(),
            ledger.pcd_count(),
            money(config, ledger.total_revenue()),
        ),
    )
}

/// Simple report lines, one per row starting at `y = 5`
///
/// # Errors
///
/// Propagates terminal I/O errors.
pub fn summary<T: Terminal>(term: &mut T, summary: &Summary, config: &Config) -> io::Result<()> {
    let lines = [
        format!("Total clients.........: {}", summary.total_clients),
        format!(
            "Full fare.............: {} ({})",
            summary.full_fare_count,
            money(config, summary.full_fare_revenue)
        ),
        format!(
            "Half fare.............: {} ({})",
            summary.half_fare_count,
            money(config, summary.half_fare_revenue)
        ),
        format!("PCD...................: {}", summary.pcd_count),
        format!("Total revenue.........: {}", money(config, summary.total_revenue)),
        format!("Free seats............: {}", summary.free_seats),
        format!("Occupancy.............: {:.1}%", summary.occupancy_percent),
    ];
    for (y, line) in (5..).zip(&lines) {
        term.write_at(PROMPT_X, y, line)?;
    }
    Ok(())
}

/// One line of the detailed report, e.g. `A01 - Half (PCD)`
#[must_use]
pub fn seat_line(item: &SeatDescriptor) -> String {
    format!(
        "{} - {}{}",
        item.seat,
        item.fare,
        if item.pcd { " (PCD)" } else { "" }
    )
}

/// Occupancy chart
///
/// # Errors
///
/// Propagates terminal I/O errors.
pub fn bar_chart<T: Terminal>(
    term: &mut T,
    summary: &Summary,
    chart: &BarChart,
) -> io::Result<()> {
    term.write_at(
        20,
        6,
        &format!(
            "Occupancy: {:.1}% ({}/{})",
            summary.occupancy_percent,
            chart.occupied.count,
            cinema_core::SEAT_COUNT
        ),
    )?;

    let bars = [
        (8, "", Color::Red, chart.occupied, ""),
        (10, "", Color::Green, chart.free, " free"),
        (13, "Full    ", Color::Red, chart.full_fare, ""),
        (15, "Half    ", Color::Green, chart.half_fare, ""),
        (17, "PCD     ", Color::Yellow, chart.pcd, ""),
    ];
    for (y, label, color, bar, suffix) in bars {
        term.write_at(20, y, label)?;
        term.set_color(color)?;
        term.write(&"█".repeat(bar.length as usize))?;
        term.set_color(Color::White)?;
        term.write(&format!(" {}{suffix}", bar.count))?;
    }
    Ok(())
}

/// Farewell screen
///
/// # Errors
///
/// Propagates terminal I/O errors.
pub fn farewell<T: Terminal>(term: &mut T, config: &Config) -> io::Result<()> {
    term.clear()?;
    centered(term, "Thank you for using the system!", 12)?;
    centered(term, &config.title, 14)?;
    term.write_at(30, 16, "Press any key to exit...")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::terminal::ScriptedTerminal;
    use cinema_core::environment::SystemClock;
    use cinema_core::{FareType, ReportEngine, ReservationService, TheaterEnvironment};
    use std::sync::Arc;

    fn state_with_two_seats() -> TheaterState {
        let service = ReservationService::new(TheaterEnvironment::new(Arc::new(SystemClock)));
        let mut state = TheaterState::new();
        service.reserve(&mut state, 'A', 2, FareType::Half).unwrap();
        service.reserve(&mut state, 'C', 5, FareType::Full).unwrap();
        state
    }

    #[test]
    fn test_seat_map_symbols() {
        let mut term = ScriptedTerminal::new();
        seat_map(&mut term, state_with_two_seats().grid()).unwrap();

        let screen = term.screen();
        let lines: Vec<&str> = screen.lines().collect();
        assert_eq!(lines[9].trim(), "1  2  3  4  5  6  7  8  9 10 11 12");
        assert!(lines[10].starts_with(&format!("{}A  [P][X][P]", " ".repeat(30))));
        assert!(lines[12].contains("[ ][ ][ ][ ][X][ ]"));
        assert_eq!(lines[17].matches("[ ]").count(), 12);
    }

    #[test]
    fn test_main_screen_status_bar() {
        let mut term = ScriptedTerminal::new();
        main_screen(&mut term, &state_with_two_seats(), &Config::default()).unwrap();

        let screen = term.screen();
        assert!(screen.contains("CINEMA ESTRELA CADENTE - Reservation Management"));
        assert!(screen.contains(
            "Clients:   2 | Full:   1 | Half:   1 | PCD:   1 | Total: R$ 60.00"
        ));
        assert!(screen.contains("Full: R$ 40.00 | Half: R$ 20.00"));
        assert!(screen.contains("6-Exit"));
    }

    #[test]
    fn test_summary_lines() {
        let state = state_with_two_seats();
        let mut term = ScriptedTerminal::new();
        summary(&mut term, &ReportEngine::new(&state).summary(), &Config::default()).unwrap();

        let screen = term.screen();
        assert!(screen.contains("Half fare.............: 1 (R$ 20.00)"));
        assert!(screen.contains("Free seats............: 94"));
        assert!(screen.contains("Occupancy.............: 2.1%"));
    }

    #[test]
    fn test_seat_line() {
        let state = state_with_two_seats();
        let lines: Vec<String> = ReportEngine::new(&state)
            .itemized_occupied()
            .map(|item| seat_line(&item))
            .collect();
        assert_eq!(lines, ["A02 - Half (PCD)", "C05 - Full"]);
    }

    #[test]
    fn test_centered_text() {
        let mut term = ScriptedTerminal::new();
        centered(&mut term, "ABCD", 0).unwrap();
        assert_eq!(term.screen(), format!("{}ABCD", " ".repeat(38)));
    }
}
