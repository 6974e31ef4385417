//! `cobie-bundle plan`: print the resolved jobs without building.

use cobie_bundler::RolldownEngine;

use crate::cli::BundleArgs;
use crate::commands::load_config;
use crate::error::Result;

/// Render the planned jobs as pretty JSON.
pub fn render(args: &BundleArgs) -> Result<String> {
    let config = load_config(args)?;
    let plan = config.pipeline(RolldownEngine::new()).plan();
    Ok(serde_json::to_string_pretty(&plan)?)
}

/// Execute the plan command, writing the JSON to stdout.
pub fn execute(args: BundleArgs) -> Result<()> {
    println!("{}", render(&args)?);
    Ok(())
}
