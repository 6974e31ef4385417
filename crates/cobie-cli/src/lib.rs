//! The `cobie-bundle` command-line interface.
//!
//! - [`cli`] - clap definitions
//! - [`commands`] - `build` and `plan`
//! - [`error`] - [`CliError`] and miette conversion
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - status lines and formatting

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result};
