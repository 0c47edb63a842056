//! `pipesync diff` — print the pending changeset as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use pipesync_core::state::state_path_at;
use pipesync_sync::plan;

/// Arguments for `pipesync diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Root directory of the tracked pipeline tree.
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// State file location (defaults to pipesync.json under the root).
    #[arg(long)]
    pub state_file: Option<PathBuf>,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let state_path = self
            .state_file
            .unwrap_or_else(|| state_path_at(&self.root));

        let changeset = plan(&self.root, &state_path)
            .with_context(|| format!("diff failed for '{}'", self.root.display()))?;

        println!("{}", serde_json::to_string_pretty(&changeset)?);
        Ok(())
    }
}
