//! Initialize a new Gitlet repository.
//!
//! The `init` command creates `.gitlet/` in the current directory with the
//! initial commit and a `master` branch pointing at it.

use crate::repo::current_root;
use anyhow::Result;
use clap::Parser;
use gitlet_versioning::Repository;
use tracing::info;

/// Initialize a new Gitlet repository
#[derive(Parser, Debug)]
pub struct InitCmd {}

impl InitCmd {
    pub fn execute(&self) -> Result<()> {
        let root = current_root()?;
        let repo = Repository::init(&root)?;
        info!(root = %root.display(), branch = %repo.current_branch(), "Initialized repository");
        Ok(())
    }
}
