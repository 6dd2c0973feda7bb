//! End-to-end shell sessions driven by a scripted terminal.

#![allow(clippy::expect_used, clippy::unwrap_used)] // Test code can use unwrap/expect

use cinema::{Config, ScriptedTerminal, Shell, ShellError, TheaterStore};
use cinema_core::{FareType, TheaterAction};
use cinema_testing::helpers::test_store;
use std::time::Duration;

/// Runs a session and returns the terminal and the store it used
fn session(
    store: &TheaterStore,
    keys: &str,
    lines: &[&str],
) -> (ScriptedTerminal, Result<(), ShellError>) {
    let terminal = ScriptedTerminal::new()
        .with_keys(keys)
        .with_lines(lines.iter().copied());
    let mut shell = Shell::new(terminal, store.clone(), Config::default());
    let result = shell.run();
    (shell.into_terminal(), result)
}

fn reserve(store: &TheaterStore, row: char, column: i32, fare: FareType) {
    let events = store
        .send(TheaterAction::ReserveSeat { row, column, fare })
        .unwrap();
    assert!(matches!(events.as_slice(), [TheaterAction::SeatReserved(_)]));
}

fn clients(store: &TheaterStore) -> u32 {
    store.state(|s| s.ledger().total_clients()).unwrap()
}

#[test]
fn test_reserve_and_exit() {
    let store = test_store();
    // menu 1, row c (upper-cased), fare 1, ack, menu 6, farewell key
    let (term, result) = session(&store, "1c1x6 ", &["5"]);

    result.unwrap();
    let transcript = term.transcript();
    assert!(transcript.contains("RESERVE SEAT"));
    assert!(transcript.contains("Reservation confirmed! C05 - Full - R$ 40.00"));
    assert!(transcript.contains("Thank you for using the system!"));
    assert!(transcript.contains("Clients:   1 | Full:   1"));
    assert_eq!(term.remaining_keys(), 0);
    assert!(term.is_cursor_visible());
    assert_eq!(term.title(), Some("CINEMA ESTRELA CADENTE - Reservation Management"));
    assert_eq!(clients(&store), 1);
}

#[test]
fn test_pcd_seat_rejects_full_fare() {
    let store = test_store();
    let (term, result) = session(&store, "1a1x6 ", &["3"]);

    result.unwrap();
    assert!(term.transcript().contains("PCD: half fare only!"));
    assert_eq!(clients(&store), 0);
}

#[test]
fn test_pcd_seat_accepts_half_fare() {
    let store = test_store();
    let (term, result) = session(&store, "1a2x6 ", &["3"]);

    result.unwrap();
    assert!(
        term.transcript()
            .contains("Reservation confirmed! A03 - Half - R$ 20.00")
    );
    assert_eq!(store.state(|s| s.ledger().pcd_count()).unwrap(), 1);
}

#[test]
fn test_invalid_fare_key() {
    let store = test_store();
    let (term, result) = session(&store, "1b9x6 ", &["4"]);

    result.unwrap();
    assert!(term.transcript().contains("Invalid fare type!"));
    assert_eq!(clients(&store), 0);
}

#[test]
fn test_occupied_seat_skips_fare_prompt() {
    let store = test_store();
    reserve(&store, 'C', 5, FareType::Full);

    let (term, result) = session(&store, "1cx6 ", &["5"]);

    result.unwrap();
    let transcript = term.transcript();
    assert!(transcript.contains("Seat already occupied!"));
    assert!(!transcript.contains("Fare: 1-Full"));
    assert_eq!(clients(&store), 1);
}

#[test]
fn test_malformed_and_out_of_range_columns() {
    let store = test_store();
    let (term, result) = session(&store, "1cx1dx1zx6 ", &["abc", "13", "1"]);

    result.unwrap();
    let transcript = term.transcript();
    assert!(transcript.contains("Invalid input!"));
    assert_eq!(transcript.matches("Invalid seat!").count(), 2);
    assert_eq!(clients(&store), 0);
}

#[test]
fn test_cancel_refunds() {
    let store = test_store();
    reserve(&store, 'A', 1, FareType::Half);

    let (term, result) = session(&store, "2ax2ax6 ", &["1", "1"]);

    result.unwrap();
    let transcript = term.transcript();
    assert!(transcript.contains("CANCEL RESERVATION"));
    assert!(transcript.contains("Cancelled! Refunded: R$ 20.00"));
    assert!(transcript.contains("Seat is free!"));
    assert_eq!(clients(&store), 0);
}

#[test]
fn test_invalid_menu_choice_pauses() {
    let store = test_store();
    let (term, result) = session(&store, "96 ", &[]);

    result.unwrap();
    assert!(term.transcript().contains("Invalid option! Try again."));
    assert_eq!(term.pauses(), [Duration::from_millis(1500)]);
}

#[test]
fn test_simple_report() {
    let store = test_store();
    for column in 1..=12 {
        reserve(&store, 'A', column, FareType::Half);
        reserve(&store, 'B', column, FareType::Full);
    }

    let (term, result) = session(&store, "3x6 ", &[]);

    result.unwrap();
    let transcript = term.transcript();
    assert!(transcript.contains("SIMPLE REPORT"));
    assert!(transcript.contains("Total clients.........: 24"));
    assert!(transcript.contains("Full fare.............: 12 (R$ 480.00)"));
    assert!(transcript.contains("Total revenue.........: R$ 720.00"));
    assert!(transcript.contains("Occupancy.............: 25.0%"));
}

#[test]
fn test_detailed_report_paginates() {
    let store = test_store();
    for column in 1..=12 {
        reserve(&store, 'B', column, FareType::Full);
    }
    for column in 1..=8 {
        reserve(&store, 'C', column, FareType::Half);
    }

    // menu 4, "More..." key, final key, exit
    let (term, result) = session(&store, "4mx6 ", &[]);

    result.unwrap();
    let screens = term.screens();
    let first = screens
        .iter()
        .find(|s| s.contains("DETAILED REPORT"))
        .expect("report screen");
    assert!(first.contains("B01 - Full"));
    assert!(first.contains("C06 - Half"));
    assert!(!first.contains("C07 - Half"));
    assert!(first.contains("More..."));

    let second = screens
        .iter()
        .find(|s| s.contains("Continued"))
        .expect("continuation screen");
    assert!(second.contains("C07 - Half"));
    assert!(second.contains("C08 - Half"));
    assert!(second.contains("Total: 20"));
}

#[test]
fn test_detailed_report_empty_room() {
    let store = test_store();
    let (term, result) = session(&store, "4x6 ", &[]);

    result.unwrap();
    let screens = term.screens();
    let report = screens
        .iter()
        .find(|s| s.contains("DETAILED REPORT"))
        .expect("report screen");
    assert!(report.contains("No seats occupied."));
    assert!(!report.contains("Total:"));
}

#[test]
fn test_chart() {
    let store = test_store();
    for row in ['B', 'C', 'D', 'E'] {
        for column in 1..=12 {
            reserve(&store, row, column, FareType::Full);
        }
    }

    let (term, result) = session(&store, "5x6 ", &[]);

    result.unwrap();
    let transcript = term.transcript();
    assert!(transcript.contains("OCCUPANCY CHART"));
    assert!(transcript.contains("Occupancy: 50.0% (48/96)"));
    assert!(transcript.contains(&format!("{} 48", "█".repeat(25))));
    assert!(transcript.contains(&format!("{} 48 free", "█".repeat(25))));
    assert!(transcript.contains("PCD      0"));
}

#[test]
fn test_script_running_out_still_restores_cursor() {
    let store = test_store();
    let (term, result) = session(&store, "1c", &[]);

    assert!(matches!(result, Err(ShellError::Io(_))));
    assert!(term.is_cursor_visible());
}
