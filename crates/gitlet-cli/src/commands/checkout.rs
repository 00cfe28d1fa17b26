//! Restore files and switch branches.
//!
//! Three forms:
//!
//! ```text
//! gitlet checkout -- FILE            restore FILE from the current commit
//! gitlet checkout COMMIT -- FILE     restore FILE from COMMIT
//! gitlet checkout BRANCH             switch to BRANCH
//! ```

use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;
use gitlet_versioning::VcsError;

/// Restore a file or switch branches
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    gitlet checkout -- notes.txt
    gitlet checkout 3f2a9c1e -- notes.txt
    gitlet checkout feature")]
pub struct CheckoutCmd {
    /// Branch to switch to, or commit to restore FILE from
    #[arg(value_name = "TARGET")]
    pub target: Option<String>,

    /// File to restore (after `--`)
    #[arg(value_name = "FILE", last = true)]
    pub file: Option<String>,
}

impl CheckoutCmd {
    pub fn execute(&self) -> Result<()> {
        let mut repo = open_repository()?;
        match (self.target.as_deref(), self.file.as_deref()) {
            (commit, Some(file)) => repo.checkout_file(commit, file)?,
            (Some(branch), None) => repo.checkout_branch(branch)?,
            (None, None) => return Err(VcsError::InvalidArguments.into()),
        }
        Ok(())
    }
}
