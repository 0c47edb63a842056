//! pipesync — mirror a local tree of pipeline definitions onto a remote
//! job server.
//!
//! # Usage
//!
//! ```text
//! pipesync sync [ROOT] --url <URL> [--user <NAME>] [--api-token <TOKEN>]
//!               [--state-file <PATH>] [--dry-run]
//! pipesync diff [ROOT] [--state-file <PATH>]
//! ```
//!
//! Connection settings also come from `PIPESYNC_URL`, `PIPESYNC_USER` and
//! `PIPESYNC_API_TOKEN`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{diff::DiffArgs, sync::SyncArgs};

#[derive(Parser, Debug)]
#[command(
    name = "pipesync",
    version,
    about = "Mirror a local pipeline definition tree onto a remote job server",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reconcile the local tree with the remote server.
    Sync(SyncArgs),

    /// Print the pending changeset as JSON without contacting the server.
    Diff(DiffArgs),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Diff(args) => args.run(),
    }
}
