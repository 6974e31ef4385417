//! Terminal status lines and formatting.
//!
//! Status lines go to stderr; stdout is reserved for `plan` output.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use owo_colors::{OwoColorize, Stream, Style};

static QUIET: AtomicBool = AtomicBool::new(false);

/// Force colors on or off for every status line.
pub fn init_colors(enabled: bool) {
    owo_colors::set_override(enabled);
}

/// Silence every status line (`--quiet`).
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn status(symbol: &str, style: Style, message: &str) {
    if QUIET.load(Ordering::Relaxed) {
        return;
    }
    eprintln!(
        "{} {}",
        symbol.if_supports_color(Stream::Stderr, |s| s.style(style)),
        message
    );
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    status("✓", Style::new().green().bold(), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    status("ℹ", Style::new().blue().bold(), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    status("⚠", Style::new().yellow().bold(), message);
}

/// Format a file size in the largest fitting unit.
///
/// ```
/// use cobie_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format a duration as `ms`, seconds, or `Xm Ys`.
///
/// ```
/// use std::time::Duration;
/// use cobie_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
