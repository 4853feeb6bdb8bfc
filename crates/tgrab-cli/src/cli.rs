//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tgrab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (per-attachment paths and failure diagnostics)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download ticket attachments and explode archives
    Grab(GrabArgs),
    /// Recursively explode local archive files in place
    Explode(ExplodeArgs),
}

#[derive(clap::Args)]
pub struct GrabArgs {
    /// Ticket(s) to grab attachments from, comma-separated
    /// (default: all of your open tickets)
    #[arg(short, long, value_name = "IDS", value_delimiter = ',')]
    pub tickets: Option<Vec<u64>>,

    /// Agent whose open tickets to search (default: me)
    #[arg(short, long, value_name = "AGENT")]
    pub agent: Option<String>,

    /// Helpdesk URL (e.g. https://example.zendesk.com)
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// E-mail address for the helpdesk login
    #[arg(short, long, value_name = "EMAIL")]
    pub mail: Option<String>,

    /// Password for the helpdesk login
    #[arg(short, long, value_name = "SECRET", conflicts_with = "token")]
    pub password: Option<String>,

    /// API token for the helpdesk login (used instead of a password)
    #[arg(long, value_name = "SECRET")]
    pub token: Option<String>,

    /// Working directory to store attachments in (default: ~/tgrab)
    #[arg(short, long, value_name = "DIR")]
    pub work_dir: Option<PathBuf>,

    /// Configuration file, read on top of ~/.tgrab.toml
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Maximum nested-archive recursion depth
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,
}

#[derive(clap::Args)]
pub struct ExplodeArgs {
    /// Archive files to explode beside themselves
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Maximum nested-archive recursion depth
    #[arg(long, value_name = "N", default_value_t = tgrab_core::explode::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}
