//! Logging setup for the `cobie-bundle` CLI.
//!
//! Level selection, highest priority first:
//! 1. `--verbose`: DEBUG for the cobie crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG`
//! 4. INFO for the cobie crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "cobie_bundler=debug,cobie_config=debug,cobie_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "cobie_bundler=info,cobie_config=info,cobie_cli=info";

/// Build the filter for the given flags.
pub fn build_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Install the global tracing subscriber. Call once, before any logging.
///
/// Logs go to stderr so `plan` output on stdout stays machine-readable.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(build_filter(verbose, quiet))
        .with(fmt_layer)
        .init();
}

/// Whether colored output should be enabled.
///
/// `NO_COLOR` disables colors, `FORCE_COLOR` forces them, otherwise the
/// stderr terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}
