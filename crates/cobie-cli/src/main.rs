//! `cobie-bundle` entry point.

use clap::Parser;
use cobie_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(!args.no_color && logger::should_use_colors());
    ui::set_quiet(args.quiet);

    let result = match args.command.unwrap_or(cli::Command::Build) {
        cli::Command::Build => commands::build_execute(args.args).await.map(|_| ()),
        cli::Command::Plan => commands::plan_execute(args.args),
    };

    result.map_err(error::cli_error_to_miette)
}
