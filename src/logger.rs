//! Logging utilities with colored output and progress display.
//!
//! This module provides:
//! - `log!` macro for formatted terminal output with colored prefixes
//! - `debug!` macro, printed only with `--verbose`
//! - `ProgressLine` for single-line progress display with multiple counters
//!
//! # Example
//!
//! ```ignore
//! log!("normalize"; "{} ({} paths)", output.display(), count);
//!
//! let progress = ProgressLine::new("gather", &[("copied", 80)]);
//! progress.inc("copied");
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::{OwoColorize, Stream, Style};
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

/// Global verbose flag (set by --verbose CLI argument)
static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set verbose mode globally
pub fn set_verbose(v: bool) {
    VERBOSE.store(v, Ordering::SeqCst);
}

/// Check if verbose mode is enabled
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::SeqCst)
}

/// Active progress line count (for log coordination)
static BAR_COUNT: AtomicUsize = AtomicUsize::new(0);

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a debug message (only shown when --verbose is enabled)
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);

    let mut stdout = stdout().lock();

    let bar_count = BAR_COUNT.load(Ordering::SeqCst);
    if bar_count > 0 {
        execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
    }

    writeln!(stdout, "{prefix} {message}").ok();
    stdout.flush().ok();
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    let style = match module.to_ascii_lowercase().as_str() {
        "normalize" => Style::new().bright_green(),
        "gather" => Style::new().bright_blue(),
        "error" | "missing" => Style::new().bright_red(),
        _ => Style::new().bright_yellow(),
    }
    .bold();
    prefix
        .if_supports_color(Stream::Stdout, |p| p.style(style))
        .to_string()
}

// ============================================================================
// Progress Line (single-line counters)
// ============================================================================

/// Single-line progress display with multiple counters
///
/// Displays: `[gather] copied(42/80)`
///
/// All counters update in place on the same line. Uses `try_lock` so rayon
/// workers never block on the display; a busy display just skips a refresh.
pub struct ProgressLine {
    label: &'static str,
    counters: Vec<Counter>,
    lock: Mutex<()>,
}

struct Counter {
    name: &'static str,
    total: usize,
    current: AtomicUsize,
}

impl ProgressLine {
    /// Create a progress display under `label`.
    ///
    /// Only includes counters with total > 0.
    pub fn new(label: &'static str, items: &[(&'static str, usize)]) -> Self {
        let counters: Vec<_> = items
            .iter()
            .filter(|(_, total)| *total > 0)
            .map(|&(name, total)| Counter {
                name,
                total,
                current: AtomicUsize::new(0),
            })
            .collect();

        BAR_COUNT.store(1, Ordering::SeqCst);

        let progress = Self {
            label,
            counters,
            lock: Mutex::new(()),
        };
        progress.display(false);
        progress
    }

    /// Increment the counter with the given name.
    #[inline]
    pub fn inc(&self, name: &str) {
        if let Some(counter) = self.counters.iter().find(|c| c.name == name) {
            counter.current.fetch_add(1, Ordering::Relaxed);
            if self.lock.try_lock().is_some() {
                self.display(false);
            }
        }
    }

    fn line(&self) -> String {
        self.counters
            .iter()
            .map(|c| format!("{}({}/{})", c.name, c.current.load(Ordering::Relaxed), c.total))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Redraw the line in place; `newline` keeps it on screen.
    fn display(&self, newline: bool) {
        let prefix = colorize_prefix(self.label);
        let line = self.line();

        let mut stdout = stdout().lock();
        execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        if newline {
            writeln!(stdout, "{prefix} {line}").ok();
        } else {
            write!(stdout, "{prefix} {line}").ok();
        }
        stdout.flush().ok();
    }

    /// Finish progress display, preserve line and move to next line.
    pub fn finish(self) {
        BAR_COUNT.store(0, Ordering::SeqCst);
        {
            let _guard = self.lock.lock();
            self.display(true);
        }
        std::mem::forget(self); // skip Drop's clear
    }
}

impl Drop for ProgressLine {
    fn drop(&mut self) {
        BAR_COUNT.store(0, Ordering::SeqCst);

        let mut stdout = stdout().lock();
        execute!(stdout, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
        stdout.flush().ok();
    }
}
