//! # cobie-bundler
//!
//! Builds the COBie Coach interop entry into two browser bundles: a minified
//! production artifact and an unminified debug artifact. Both are IIFE bundles
//! that bind the module's public API to a single global name.
//!
//! ## Quick Start
//!
//! ```no_run
//! use cobie_bundler::{BuildJob, Pipeline, RolldownEngine};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let template = BuildJob::new("./Interop/JS.fs.js", "COBieCoach");
//! let pipeline = Pipeline::new(RolldownEngine::new(), template, "fable_build", "cobie-coach");
//!
//! let report = pipeline.run().await?;
//! for outcome in report.outcomes() {
//!     println!("{} -> {}", outcome.label, outcome.artifact.path.display());
//! }
//! # Ok(()) }
//! ```
//!
//! The bundling work itself sits behind [`BundlerEngine`]; [`RolldownEngine`] is
//! the shipped implementation.

pub mod diagnostics;
pub mod engine;
pub mod job;
pub mod output;
pub mod pipeline;

pub use engine::{ArtifactWritten, BundlerEngine, RolldownEngine};
pub use job::{BuildJob, BundleFormat, EsTarget, is_valid_identifier};
pub use pipeline::{JobOutcome, Pipeline, PipelineReport, PlannedJob};

use std::path::PathBuf;

/// Error types for cobie-bundler operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Entry module does not exist or is not a regular file.
    #[error("Entry module not found: {}", .0.display())]
    EntryNotFound(PathBuf),

    /// Error reported by the bundler engine (resolution or transform).
    #[error("Bundler error: {}", format_bundler_error(.0))]
    Bundler(Vec<diagnostics::ExtractedDiagnostic>),

    /// Invalid job configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Writing an artifact failed.
    #[error("Failed to write '{}': {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A pipeline job failed; wraps the underlying error verbatim.
    #[error("{label} build failed ({}): {source}", .outfile.display())]
    JobFailed {
        label: String,
        outfile: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

/// Result type alias for cobie-bundler operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a batch of Rolldown diagnostics.
    pub fn from_rolldown_batch(batch: &rolldown_error::BatchedBuildDiagnostic) -> Self {
        Error::Bundler(diagnostics::extract_from_rolldown_batch(batch.iter()))
    }

    /// Label of the failing job, if this error came out of the pipeline.
    pub fn failed_job(&self) -> Option<&str> {
        match self {
            Error::JobFailed { label, .. } => Some(label),
            _ => None,
        }
    }

    /// The innermost error, skipping any `JobFailed` wrapper.
    pub fn root(&self) -> &Error {
        match self {
            Error::JobFailed { source, .. } => source.root(),
            other => other,
        }
    }
}

fn format_bundler_error(diagnostics: &[diagnostics::ExtractedDiagnostic]) -> String {
    match diagnostics {
        [] => "Unknown bundler error".to_string(),
        [diag] => format!("{}: {}", diag.kind, diag.message),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|d| format!("{}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::EntryNotFound(_) => "ENTRY_NOT_FOUND",
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::WriteFailure { .. } => "WRITE_FAILURE",
            Error::Io(_) => "IO_ERROR",
            Error::JobFailed { .. } => "JOB_FAILED",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::EntryNotFound(path) => Some(Box::new(format!(
                "Compile the interop module first so that '{}' exists, or pass --entry.",
                path.display()
            ))),
            Error::WriteFailure { path, .. } => Some(Box::new(format!(
                "Check that the directory of '{}' is writable and is not a file.",
                path.display()
            ))),
            Error::Bundler(diagnostics) => match diagnostics.as_slice() {
                [diag] => diag
                    .help
                    .as_ref()
                    .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>),
                _ => None,
            },
            Error::JobFailed { source, .. } => source.help(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagnostics::{DiagnosticKind, DiagnosticSeverity, ExtractedDiagnostic};
    use miette::Diagnostic;

    fn diag(kind: DiagnosticKind, message: &str) -> ExtractedDiagnostic {
        ExtractedDiagnostic {
            kind,
            severity: DiagnosticSeverity::Error,
            message: message.to_string(),
            file: None,
            help: None,
        }
    }

    #[test]
    fn job_failed_keeps_underlying_message() {
        let err = Error::JobFailed {
            label: "debug".to_string(),
            outfile: PathBuf::from("fable_build/cobie-coach.js"),
            source: Box::new(Error::EntryNotFound(PathBuf::from("Interop/JS.fs.js"))),
        };

        let msg = err.to_string();
        assert!(msg.starts_with("debug build failed"));
        assert!(msg.contains("fable_build/cobie-coach.js"));
        assert!(msg.contains("Entry module not found: Interop/JS.fs.js"));
        assert_eq!(err.failed_job(), Some("debug"));
        assert!(matches!(err.root(), Error::EntryNotFound(_)));
    }

    #[test]
    fn bundler_error_formats_single_and_many() {
        let one = Error::Bundler(vec![diag(DiagnosticKind::ParseError, "Unexpected token")]);
        assert_eq!(one.to_string(), "Bundler error: ParseError: Unexpected token");

        let many = Error::Bundler(vec![
            diag(DiagnosticKind::ParseError, "a"),
            diag(DiagnosticKind::UnresolvedImport, "b"),
        ]);
        assert_eq!(
            many.to_string(),
            "Bundler error: 2 errors: ParseError: a; UnresolvedImport: b"
        );

        assert_eq!(
            Error::Bundler(Vec::new()).to_string(),
            "Bundler error: Unknown bundler error"
        );
    }

    #[test]
    fn diagnostic_codes() {
        let code = |e: &Error| e.code().map(|c| c.to_string());
        assert_eq!(
            code(&Error::EntryNotFound(PathBuf::from("x.js"))).as_deref(),
            Some("ENTRY_NOT_FOUND")
        );
        assert_eq!(
            code(&Error::InvalidConfig("x".into())).as_deref(),
            Some("INVALID_CONFIG")
        );
        assert!(
            Error::EntryNotFound(PathBuf::from("x.js"))
                .help()
                .is_some()
        );
    }
}
