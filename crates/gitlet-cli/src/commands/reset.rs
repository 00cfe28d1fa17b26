//! Move the current branch to a commit.

use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;
use tracing::debug;

/// Check out every file of COMMIT and move the current branch there
///
/// COMMIT may be abbreviated to any unique prefix of at least four hex digits.
#[derive(Parser, Debug)]
pub struct ResetCmd {
    /// Commit id
    #[arg(value_name = "COMMIT")]
    pub commit: String,
}

impl ResetCmd {
    pub fn execute(&self) -> Result<()> {
        let mut repo = open_repository()?;
        let oid = repo.reset(&self.commit)?;
        debug!(commit = %oid, "Reset");
        Ok(())
    }
}
