//! Record changes to the repository.
//!
//! The `commit` command snapshots the current commit's files with the staged
//! additions and removals applied.

use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;
use tracing::debug;

/// Record the staged changes
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    gitlet commit \"Add the parser\"")]
pub struct CommitCmd {
    /// Commit message
    #[arg(value_name = "MESSAGE", allow_hyphen_values = true)]
    pub message: Option<String>,
}

impl CommitCmd {
    pub fn execute(&self) -> Result<()> {
        let mut repo = open_repository()?;
        // A missing message is reported the same way as an empty one
        let oid = repo.commit(self.message.as_deref().unwrap_or_default())?;
        debug!(commit = %oid, "Committed");
        Ok(())
    }
}
