//! Progress display for the update workflow
//!
//! Two layers:
//! - `render_line` is a pure, stateless renderer turning a
//!   `(done, total)` pair into a bounded-width bar line. In-progress
//!   lines start with a carriage return and carry no newline, so each
//!   update overwrites the previous one; the terminal 100% line is
//!   newline-terminated so the finished bar stays on screen. When the
//!   total is unknown the renderer degrades to a byte counter.
//! - `ProgressPrinter` writes rendered lines to stdout with the
//!   colored palette (magenta in flight, green on completion).
//!
//! Indeterminate phases (waiting on the release feed) use an indicatif
//! spinner instead.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Write};
use std::time::Duration;

/// Default progress bar width in glyphs
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Glyph for the filled portion of the bar
const FILL_GLYPH: char = '-';

/// Glyph for the remaining portion of the bar
const PLACEHOLDER_GLYPH: char = '.';

/// Render one progress line for a `(done, total)` pair
///
/// `total` of `None` or `Some(0)` selects byte-counter mode; there is
/// no division by zero.
pub fn render_line(done: u64, total: Option<u64>, width: usize, label: &str) -> String {
    let total = match total {
        Some(t) if t > 0 => t,
        _ => return format!("\r{}{} bytes", label, done),
    };

    if done >= total {
        let bar: String = std::iter::repeat(FILL_GLYPH).take(width).collect();
        return format!("\r{}[{}] 100.00%\n", label, bar);
    }

    let percent = done as f64 / total as f64 * 100.0;
    let filled = ((percent / (100.0 / width as f64)) as usize).min(width);
    let mut bar = String::with_capacity(width);
    for _ in 0..filled {
        bar.push(FILL_GLYPH);
    }
    for _ in filled..width {
        bar.push(PLACEHOLDER_GLYPH);
    }

    format!("\r{}[{}] {:.2}%", label, bar, percent)
}

/// Stateless printer wiring rendered lines to stdout
pub struct ProgressPrinter {
    /// Whether output is produced at all (disabled in quiet mode)
    enabled: bool,
    /// Bar width in glyphs
    width: usize,
    /// Text preceding the bar
    label: String,
}

impl ProgressPrinter {
    /// Create a printer with the given width and label
    pub fn new(enabled: bool, width: usize, label: impl Into<String>) -> Self {
        Self {
            enabled,
            width,
            label: label.into(),
        }
    }

    /// Render and print one progress update
    pub fn update(&self, done: u64, total: Option<u64>) {
        if !self.enabled {
            return;
        }

        let line = render_line(done, total, self.width, &self.label);
        let completed = matches!(total, Some(t) if t > 0 && done >= t);

        let mut stdout = io::stdout().lock();
        if completed {
            let _ = writeln!(stdout, "{}", line.trim_end_matches('\n').green());
        } else {
            let _ = write!(stdout, "{}", line.magenta());
        }
        let _ = stdout.flush();
    }
}

/// Spinner for indeterminate operations
pub struct Spinner {
    /// Whether the spinner is shown (disabled in quiet mode)
    enabled: bool,
    /// Current spinner, if one is running
    bar: Option<ProgressBar>,
}

impl Spinner {
    /// Create a new spinner handle
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Show a spinner with a message
    pub fn start(&mut self, message: &str) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                .template("{spinner:.cyan} {msg}")
                .expect("Invalid template"),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Finish and clear the current spinner
    pub fn finish_and_clear(&mut self) {
        if let Some(ref bar) = self.bar {
            bar.finish_and_clear();
        }
        self.bar = None;
    }
}
