//! Diagnostic extraction from Rolldown errors.
//!
//! Each [`BuildDiagnostic`] in a batch becomes one [`ExtractedDiagnostic`].
//! The message is Rolldown's own text, kept verbatim; help is taken from the
//! rendered report when Rolldown attaches one.

use rolldown_error::{BuildDiagnostic, EventKind, Severity};
use serde::{Deserialize, Serialize};

/// Extracted diagnostic information from Rolldown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDiagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub file: Option<String>,
    pub help: Option<String>,
}

/// Diagnostic kind (subset of Rolldown's event kinds this pipeline cares about).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnresolvedEntry,
    UnresolvedImport,
    ParseError,
    Transform,
    InvalidOption,
    Other,
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::UnresolvedEntry => write!(f, "UnresolvedEntry"),
            DiagnosticKind::UnresolvedImport => write!(f, "UnresolvedImport"),
            DiagnosticKind::ParseError => write!(f, "ParseError"),
            DiagnosticKind::Transform => write!(f, "Transform"),
            DiagnosticKind::InvalidOption => write!(f, "InvalidOption"),
            DiagnosticKind::Other => write!(f, "Error"),
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Extract one diagnostic per entry of a Rolldown batch.
pub fn extract_from_rolldown_batch<'a>(
    diagnostics: impl IntoIterator<Item = &'a BuildDiagnostic>,
) -> Vec<ExtractedDiagnostic> {
    diagnostics.into_iter().map(extract_one).collect()
}

fn extract_one(diagnostic: &BuildDiagnostic) -> ExtractedDiagnostic {
    let kind = classify(diagnostic.kind());
    let severity = match diagnostic.severity() {
        Severity::Error => DiagnosticSeverity::Error,
        Severity::Warning => DiagnosticSeverity::Warning,
    };
    let message = diagnostic.to_string();
    let rendered = diagnostic.to_diagnostic().to_string();

    ExtractedDiagnostic {
        file: extract_file_path(&message).or_else(|| extract_file_path(&rendered)),
        help: extract_help_text(&rendered).or_else(|| default_help(&kind)),
        kind,
        severity,
        message: message.trim().to_string(),
    }
}

fn classify(kind: EventKind) -> DiagnosticKind {
    match kind {
        EventKind::UnresolvedEntry => DiagnosticKind::UnresolvedEntry,
        EventKind::UnresolvedImport
        | EventKind::ResolveError
        | EventKind::UnloadableDependencyError => DiagnosticKind::UnresolvedImport,
        EventKind::ParseError | EventKind::JsonParseError => DiagnosticKind::ParseError,
        EventKind::InvalidOptionError
        | EventKind::InvalidExportOptionError
        | EventKind::InvalidDefineConfigError
        | EventKind::MissingNameOptionForIifeExport
        | EventKind::ConfigurationFieldConflict => DiagnosticKind::InvalidOption,
        EventKind::UnsupportedFeatureError
        | EventKind::IllegalReassignmentError
        | EventKind::AssignToImportError => DiagnosticKind::Transform,
        _ => DiagnosticKind::Other,
    }
}

fn default_help(kind: &DiagnosticKind) -> Option<String> {
    match kind {
        DiagnosticKind::UnresolvedEntry => {
            Some("The entry module could not be resolved. Check the entry path.".to_string())
        }
        DiagnosticKind::UnresolvedImport => Some(
            "An import in the bundle could not be resolved. Check relative paths and node_modules."
                .to_string(),
        ),
        DiagnosticKind::ParseError => {
            Some("The module contains invalid JavaScript syntax.".to_string())
        }
        _ => None,
    }
}

/// Extract file path from error message.
fn extract_file_path(text: &str) -> Option<String> {
    for ext in &[".fs.js", ".mjs", ".cjs", ".jsx", ".js"] {
        if let Some(pos) = text.find(ext) {
            let before = &text[..pos + ext.len()];
            for indicator in &["\"", "'", "in ", "at ", "file: ", "path: "] {
                if let Some(start) = before.rfind(indicator) {
                    let path_str = before[start + indicator.len()..].trim();
                    if !path_str.is_empty() && !path_str.contains(char::is_whitespace) {
                        return Some(path_str.to_string());
                    }
                }
            }
        }
    }
    None
}

/// Extract the first help line of a rendered report.
fn extract_help_text(text: &str) -> Option<String> {
    for indicator in &["help: ", "Help: ", "hint: ", "Hint: "] {
        if let Some(pos) = text.find(indicator) {
            let help_str = text[pos + indicator.len()..]
                .lines()
                .next()
                .unwrap_or("")
                .trim();
            if !help_str.is_empty() {
                return Some(help_str.to_string());
            }
        }
    }
    None
}
