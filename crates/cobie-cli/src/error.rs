//! Error handling for the `cobie-bundle` CLI.
//!
//! [`CliError`] wraps the configuration and bundler error types so commands
//! can use `?` on either. `main` turns it into a [`miette::Report`].

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading or validating configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] cobie_config::ConfigError),

    /// A pipeline job failed
    #[error(transparent)]
    Build(#[from] cobie_bundler::Error),

    /// Serializing the plan failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CLI error into a miette report.
///
/// Bundler errors keep their `Diagnostic` impl, so the report carries the
/// stable error code and help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(e) => Report::new(e),
        CliError::Config(cobie_config::ConfigError::NotFound(path)) => miette::miette!(
            code = "CONFIG_NOT_FOUND",
            help = "Create cobie.toml in the project root or drop --config",
            "Config file not found: {}",
            path.display()
        ),
        CliError::Config(e) => {
            miette::miette!(code = "INVALID_CONFIG", "Configuration error: {}", e)
        }
        other => miette::miette!("{}", other),
    }
}
