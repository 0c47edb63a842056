//! `pipesync sync` — reconcile the local tree with the remote server.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use pipesync_core::state::state_path_at;
use pipesync_remote::{Credentials, HttpJobServer, RemoteError};
use pipesync_sync::{plan, sync_tree, Changeset, SyncReport};

/// Arguments for `pipesync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Root directory of the tracked pipeline tree.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Base URL of the remote job server.
    #[arg(long, env = "PIPESYNC_URL")]
    pub url: Option<String>,

    /// Username for the remote server.
    #[arg(long, env = "PIPESYNC_USER")]
    pub user: Option<String>,

    /// API token for the remote server.
    #[arg(long, env = "PIPESYNC_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Read the API token from a file instead.
    #[arg(long, conflicts_with = "api_token")]
    pub api_token_file: Option<PathBuf>,

    /// State file location (defaults to pipesync.json under the root).
    #[arg(long)]
    pub state_file: Option<PathBuf>,

    /// Print the pending changeset without contacting the server or
    /// writing state.
    #[arg(long)]
    pub dry_run: bool,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let state_path = self
            .state_file
            .clone()
            .unwrap_or_else(|| state_path_at(&self.root));

        if self.dry_run {
            let changeset = plan(&self.root, &state_path)
                .with_context(|| format!("plan failed for '{}'", self.root.display()))?;
            print_plan(&changeset);
            return Ok(());
        }

        let token = match &self.api_token_file {
            Some(path) => Some(
                fs::read_to_string(path)
                    .with_context(|| format!("could not read token file '{}'", path.display()))?
                    .trim()
                    .to_string(),
            ),
            None => self.api_token.clone(),
        };
        let url = self.url.clone();
        let user = self.user.clone();

        // The connector only runs when the changeset is non-empty, so an
        // unchanged tree needs neither a URL nor credentials.
        let report = sync_tree(&self.root, &state_path, || {
            let url = url.ok_or_else(|| {
                RemoteError::Endpoint("pass --url or set PIPESYNC_URL".to_string())
            })?;
            let credentials = match (user, token) {
                (Some(user), Some(token)) => Some(Credentials { user, token }),
                _ => None,
            };
            let server = HttpJobServer::connect(&url, credentials.as_ref())?;
            let info = server.info();
            println!(
                "{} connected as {} (server {})",
                "✓".green(),
                info.user,
                info.version
            );
            Ok(server)
        })
        .with_context(|| format!("sync failed for '{}'", self.root.display()))?;

        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &SyncReport) {
    if report.is_noop() {
        println!("{} no changes — nothing to do", "✓".green());
        return;
    }

    println!(
        "{} synced ({} upserted, {} deleted, {} folders pruned)",
        "✓".green(),
        report.changeset.changed.len(),
        report.changeset.deleted.len(),
        report.pruned.len()
    );
    for path in &report.changeset.changed {
        println!("  {}  {path}", "✎".cyan());
    }
    for path in &report.changeset.deleted {
        println!("  {}  {path}", "✗".red());
    }
    for path in &report.pruned {
        println!("  {}  {path}/", "·".dimmed());
    }
}

fn print_plan(changeset: &Changeset) {
    let prefix = "[dry-run]".yellow();
    if changeset.is_empty() {
        println!("{prefix} {} no changes — nothing to do", "✓".green());
        return;
    }

    println!(
        "{prefix} would apply {} upsert(s) and {} deletion(s)",
        changeset.changed.len(),
        changeset.deleted.len()
    );
    for path in &changeset.changed {
        println!("  {}  {path}", "~".cyan());
    }
    for path in &changeset.deleted {
        println!("  {}  {path}", "✗".red());
    }
}
