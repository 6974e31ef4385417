//! Subcommand implementations.

pub mod build;
pub mod plan;

pub use build::execute as build_execute;
pub use plan::execute as plan_execute;

use crate::cli::BundleArgs;
use crate::error::Result;
use cobie_config::PipelineConfig;

/// Load and validate configuration for `args`.
pub(crate) fn load_config(args: &BundleArgs) -> Result<PipelineConfig> {
    let config = PipelineConfig::load(args.config.as_deref(), &args.overrides())?;
    config.validate()?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}
