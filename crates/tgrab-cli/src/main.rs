//! tgrab CLI - grab helpdesk ticket attachments and explode archive
//! attachments in place.

mod cli;
mod commands;
mod config;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Grab(args) => {
            commands::grab::execute(args, &*formatter, cli.quiet || cli.json)
        }
        cli::Commands::Explode(args) => commands::explode::execute(args, &*formatter),
    }
}
