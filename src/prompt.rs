//! Interactive selection of the directory to scan.
//!
//! The scan core never touches a terminal. When no path is given on the
//! command line, [`request_root_path`] asks a [`Prompter`] for one until it
//! names an existing directory or the user gives up.
//!
//! [`ConsolePrompter`] is the terminal implementation: the path is read as
//! a line from stdin, and the retry question is answered with a single key
//! (Escape quits, any other key retries).

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Source of user answers while choosing the scan root.
pub trait Prompter {
    /// Ask for a directory path.
    ///
    /// Returns `Ok(None)` when input is exhausted.
    fn read_path(&mut self) -> io::Result<Option<String>>;

    /// Tell the user `rejected` is not a valid directory and ask whether to
    /// try again.
    fn confirm_retry(&mut self, rejected: &str) -> io::Result<bool>;
}

/// Message shown for a path that is not an existing directory.
#[must_use]
pub fn invalid_directory_message(rejected: &str) -> String {
    format!("{rejected} is not a valid directory.")
}

/// Clean up a typed or pasted path.
///
/// Trims surrounding whitespace and any leading or trailing quote
/// characters, as left behind by "copy as path" in file managers.
///
/// # Example
///
/// ```
/// use dupecheck::prompt::normalize_path_input;
///
/// assert_eq!(normalize_path_input("  \"C:\\Photos\"\r\n"), "C:\\Photos");
/// assert_eq!(normalize_path_input("'/home/me/My Files'"), "/home/me/My Files");
/// ```
#[must_use]
pub fn normalize_path_input(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

/// Ask until the prompter names an existing directory.
///
/// Returns `Ok(None)` when the user declines to retry or input runs out.
///
/// # Errors
///
/// Returns any I/O error raised by the prompter.
pub fn request_root_path<P: Prompter + ?Sized>(prompter: &mut P) -> io::Result<Option<PathBuf>> {
    loop {
        let Some(raw) = prompter.read_path()? else {
            log::debug!("Path prompt reached end of input");
            return Ok(None);
        };

        let candidate = normalize_path_input(&raw);
        let path = PathBuf::from(&candidate);
        if !candidate.is_empty() && path.is_dir() {
            log::debug!("Scan root chosen interactively: {}", path.display());
            return Ok(Some(path));
        }

        log::debug!("Rejected scan root: {:?}", candidate);
        if !prompter.confirm_retry(&candidate)? {
            return Ok(None);
        }
    }
}

/// Prompter reading from the controlling terminal.
///
/// Prompts and messages go to stderr so the report on stdout stays clean.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl ConsolePrompter {
    /// Create a console prompter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn read_retry_key() -> io::Result<bool> {
        let _raw = RawModeGuard::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let ctrl_c = key.code == KeyCode::Char('c')
                    && key.modifiers.contains(KeyModifiers::CONTROL);
                return Ok(!(key.code == KeyCode::Esc || ctrl_c));
            }
        }
    }
}

impl Prompter for ConsolePrompter {
    fn read_path(&mut self) -> io::Result<Option<String>> {
        let mut stderr = io::stderr();
        write!(stderr, "Directory to scan: ")?;
        stderr.flush()?;

        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn confirm_retry(&mut self, rejected: &str) -> io::Result<bool> {
        eprintln!("{}", invalid_directory_message(rejected));

        if !io::stdin().is_terminal() {
            return Ok(false);
        }

        eprintln!("Press Esc to quit, or any other key to try again.");
        Self::read_retry_key()
    }
}

/// Keeps the terminal in raw mode for one key read.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}
