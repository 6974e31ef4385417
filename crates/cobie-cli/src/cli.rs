//! Command-line interface definition for `cobie-bundle`.
//!
//! - `cobie-bundle build` - Build both artifacts (default)
//! - `cobie-bundle plan` - Print the resolved jobs as JSON

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cobie_bundler::{EsTarget, is_valid_identifier};
use cobie_config::ConfigOverrides;

/// Build the COBie Coach browser bundles
#[derive(Parser, Debug)]
#[command(
    name = "cobie-bundle",
    version,
    about = "Build the minified and debug COBie Coach browser bundles",
    long_about = "Bundles the compiled interop entry module and its imports into two\n\
                  self-contained IIFE scripts exposing one global: a minified production\n\
                  artifact and a readable debug artifact."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute (default: build)
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub args: BundleArgs,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Build the minified and debug artifacts
    Build,

    /// Print the two build jobs as JSON without building
    Plan,
}

/// Options shared by every subcommand. Unset options fall through to
/// `COBIE_*` environment variables, the config file, then defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct BundleArgs {
    /// Config file (default: cobie.toml or cobie.config.json in the project root)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root that relative paths resolve against
    #[arg(long, global = true, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Interop entry module [default: ./Interop/JS.fs.js]
    #[arg(short, long, global = true, value_name = "FILE")]
    pub entry: Option<PathBuf>,

    /// Output directory [default: fable_build]
    #[arg(short = 'd', long, global = true, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Artifact base name [default: cobie-coach]
    #[arg(long, global = true, value_name = "NAME")]
    pub package_name: Option<String>,

    /// Global variable the bundles assign their exports to [default: COBieCoach]
    #[arg(short, long, global = true, value_name = "IDENT", value_parser = parse_global)]
    pub global_name: Option<String>,

    /// Language level of the emitted code: es2015..es2022 or esnext [default: es2022]
    #[arg(short, long, global = true, value_name = "TARGET", value_parser = parse_target)]
    pub target: Option<EsTarget>,
}

impl BundleArgs {
    /// Flags as the highest-priority configuration layer.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            entry: self.entry.clone(),
            out_dir: self.out_dir.clone(),
            package_name: self.package_name.clone(),
            global_name: self.global_name.clone(),
            target: self.target,
            cwd: self.cwd.clone(),
        }
    }
}

/// Parse an ECMAScript target such as `es2020`, `ES2022`, `es6` or `esnext`.
pub fn parse_target(s: &str) -> Result<EsTarget, String> {
    s.parse::<EsTarget>().map_err(|e| e.to_string())
}

/// Parse and validate a global variable name for the IIFE bundles.
///
/// Valid: `COBieCoach`, `_internal`, `$coach`, `lib123`.
/// Invalid: `123abc`, `cobie-coach`, `cobie.coach`, `""`.
pub fn parse_global(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Err("Global name cannot be empty".to_string());
    }
    if !is_valid_identifier(s) {
        return Err(format!(
            "'{s}' is not a valid JavaScript identifier \
             (letters, digits, '_' or '$', not starting with a digit)"
        ));
    }
    Ok(s.to_string())
}
