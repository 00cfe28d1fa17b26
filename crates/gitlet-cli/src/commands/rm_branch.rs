use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;

/// Delete a branch pointer; its commits are kept
#[derive(Parser, Debug)]
pub struct RmBranchCmd {
    /// Branch name
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl RmBranchCmd {
    pub fn execute(&self) -> Result<()> {
        let mut repo = open_repository()?;
        repo.rm_branch(&self.name)?;
        Ok(())
    }
}
