//! `cobie-bundle build`: run both jobs and report the artifacts.

use std::time::Instant;

use cobie_bundler::{PipelineReport, RolldownEngine};

use crate::cli::BundleArgs;
use crate::commands::load_config;
use crate::error::Result;
use crate::ui;

/// Execute the build command.
///
/// # Errors
///
/// Configuration errors, and the first failing job's error. Artifacts
/// written before the failure are left in place.
pub async fn execute(args: BundleArgs) -> Result<PipelineReport> {
    let start_time = Instant::now();

    let config = load_config(&args)?;
    ui::info(&format!(
        "Bundling {} as {} -> {}",
        config.entry.display(),
        config.global_name,
        config.resolve_out_dir().display()
    ));

    let pipeline = config.pipeline(RolldownEngine::new());
    let report = pipeline.run().await?;

    for outcome in report.outcomes() {
        ui::success(&format!(
            "{:<8} {} ({}, {})",
            outcome.label,
            outcome.artifact.path.display(),
            ui::format_size(outcome.artifact.bytes),
            ui::format_duration(outcome.duration)
        ));
        if outcome.artifact.warnings > 0 {
            ui::warning(&format!(
                "{} build reported {} warning(s); run with --verbose for details",
                outcome.label, outcome.artifact.warnings
            ));
        }
    }

    ui::success(&format!(
        "Build completed: {} in {}",
        ui::format_size(report.total_bytes()),
        ui::format_duration(start_time.elapsed())
    ));

    Ok(report)
}
