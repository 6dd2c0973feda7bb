//! Terminal capability consumed by the shell.
//!
//! The shell only talks to [`Terminal`]. [`CrosstermTerminal`] drives a real
//! console on every platform crossterm supports; [`ScriptedTerminal`] replays
//! canned input and records what was drawn.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{cursor, queue, style, terminal};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Foreground colors used by the screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    /// Free seats
    Green,
    /// Occupied seats
    Red,
    /// Free PCD seats
    Yellow,
    /// Screen box
    Cyan,
    /// Regular text
    White,
    /// Price hint
    Grey,
}

impl From<Color> for style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Green => Self::Green,
            Color::Red => Self::Red,
            Color::Yellow => Self::Yellow,
            Color::Cyan => Self::Cyan,
            Color::White => Self::White,
            Color::Grey => Self::DarkGrey,
        }
    }
}

/// Console operations the shell needs.
///
/// Coordinates are zero-based columns (`x`) and rows (`y`).
pub trait Terminal {
    /// Clears the screen and homes the cursor
    fn clear(&mut self) -> io::Result<()>;

    /// Moves the cursor
    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()>;

    /// Changes the foreground color of following writes
    fn set_color(&mut self, color: Color) -> io::Result<()>;

    /// Restores the default colors
    fn reset_color(&mut self) -> io::Result<()>;

    /// Writes text at the cursor
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Flushes pending output
    fn flush(&mut self) -> io::Result<()>;

    /// Waits for a single key press without echo
    fn read_key(&mut self) -> io::Result<char>;

    /// Reads a line of input, without the trailing newline
    fn read_line(&mut self) -> io::Result<String>;

    /// Sleeps for `duration`
    fn pause(&mut self, duration: Duration) -> io::Result<()>;

    /// Shows or hides the cursor
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;

    /// Sets the window title
    fn set_title(&mut self, title: &str) -> io::Result<()>;

    /// Moves the cursor and writes text
    fn write_at(&mut self, x: u16, y: u16, text: &str) -> io::Result<()> {
        self.move_to(x, y)?;
        self.write(text)
    }
}

// ============================================================================
// Crossterm backend
// ============================================================================

/// Terminal backed by crossterm on standard output
#[derive(Debug)]
pub struct CrosstermTerminal {
    out: io::Stdout,
}

impl CrosstermTerminal {
    /// Creates a terminal over stdout
    #[must_use]
    pub fn new() -> Self {
        Self { out: io::stdout() }
    }

    fn next_char() -> io::Result<char> {
        loop {
            let Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) = event::read()?
            else {
                continue;
            };

            match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
                }
                KeyCode::Char(c) => return Ok(c),
                KeyCode::Enter => return Ok('\n'),
                KeyCode::Esc => return Ok('\u{1b}'),
                _ => {}
            }
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn clear(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )
    }

    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        queue!(self.out, cursor::MoveTo(x, y))
    }

    fn set_color(&mut self, color: Color) -> io::Result<()> {
        queue!(self.out, style::SetForegroundColor(color.into()))
    }

    fn reset_color(&mut self) -> io::Result<()> {
        queue!(self.out, style::ResetColor)
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, style::Print(text))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn read_key(&mut self) -> io::Result<char> {
        self.flush()?;
        terminal::enable_raw_mode()?;
        let key = Self::next_char();
        terminal::disable_raw_mode()?;
        key
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn pause(&mut self, duration: Duration) -> io::Result<()> {
        self.flush()?;
        std::thread::sleep(duration);
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            queue!(self.out, cursor::Show)
        } else {
            queue!(self.out, cursor::Hide)
        }
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        queue!(self.out, terminal::SetTitle(title))
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = queue!(self.out, style::ResetColor, cursor::Show);
        let _ = self.out.flush();
    }
}

// ============================================================================
// Scripted backend
// ============================================================================

/// In-memory terminal with scripted input and a character-cell screen.
///
/// Keys and lines come from two independent queues. Reading from an empty
/// queue fails with [`io::ErrorKind::UnexpectedEof`], which ends a shell
/// session whose script ran out.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    keys: VecDeque<char>,
    lines: VecDeque<String>,
    cells: Vec<Vec<char>>,
    cursor: (usize, usize),
    screens: Vec<String>,
    pauses: Vec<Duration>,
    cursor_visible: bool,
    color: Option<Color>,
    title: Option<String>,
}

impl ScriptedTerminal {
    /// Creates a terminal with no scripted input
    #[must_use]
    pub fn new() -> Self {
        Self {
            cursor_visible: true,
            ..Self::default()
        }
    }

    /// Queues every character of `keys` as a key press
    #[must_use]
    pub fn with_keys(mut self, keys: &str) -> Self {
        self.keys.extend(keys.chars());
        self
    }

    /// Queues input lines
    #[must_use]
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// The screen currently drawn, trailing blanks trimmed
    #[must_use]
    pub fn screen(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Screens wiped by `clear`, oldest first, followed by the current one
    #[must_use]
    pub fn screens(&self) -> Vec<String> {
        let mut screens = self.screens.clone();
        screens.push(self.screen());
        screens
    }

    /// Every screen joined together
    #[must_use]
    pub fn transcript(&self) -> String {
        self.screens().join("\n")
    }

    /// Pauses requested so far
    #[must_use]
    pub fn pauses(&self) -> &[Duration] {
        &self.pauses
    }

    /// Whether the cursor is currently shown
    #[must_use]
    pub const fn is_cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// Color of the next write, `None` after a reset
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        self.color
    }

    /// Window title, if one was set
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Keys not consumed by the session
    #[must_use]
    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }

    fn put(&mut self, c: char) {
        let (x, y) = self.cursor;
        if self.cells.len() <= y {
            self.cells.resize_with(y + 1, Vec::new);
        }
        let row = &mut self.cells[y];
        if row.len() <= x {
            row.resize(x + 1, ' ');
        }
        row[x] = c;
        self.cursor.0 += 1;
    }
}

impl Terminal for ScriptedTerminal {
    fn clear(&mut self) -> io::Result<()> {
        let screen = self.screen();
        if !screen.is_empty() {
            self.screens.push(screen);
        }
        self.cells.clear();
        self.cursor = (0, 0);
        Ok(())
    }

    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.cursor = (usize::from(x), usize::from(y));
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> io::Result<()> {
        self.color = Some(color);
        Ok(())
    }

    fn reset_color(&mut self) -> io::Result<()> {
        self.color = None;
        Ok(())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        for c in text.chars() {
            if c == '\n' {
                self.cursor = (0, self.cursor.1 + 1);
            } else {
                self.put(c);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<char> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted keys left"))
    }

    fn read_line(&mut self) -> io::Result<String> {
        self.lines
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted lines left"))
    }

    fn pause(&mut self, duration: Duration) -> io::Result<()> {
        self.pauses.push(duration);
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> io::Result<()> {
        self.title = Some(title.to_string());
        Ok(())
    }
}
