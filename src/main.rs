//! `about` command-line entry point.
use std::io::Write as _;

use about_dashboard::{cli, commands, logging};
use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);

    match args.command {
        cli::Command::Dashboard(opts) => commands::dashboard::run(&args.global, &opts),
        cli::Command::Scan(opts) => commands::scan::run(&args.global, &opts),
        cli::Command::Check => commands::check::run(&args.global),
        cli::Command::Version => {
            let version = env!("ABOUT_VERSION");
            writeln!(std::io::stdout(), "about {version}")?;
            Ok(())
        }
    }
}
