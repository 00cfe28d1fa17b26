use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;

/// Create a branch pointing at the current commit
///
/// The new branch is not checked out.
#[derive(Parser, Debug)]
pub struct BranchCmd {
    /// Branch name
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl BranchCmd {
    pub fn execute(&self) -> Result<()> {
        let mut repo = open_repository()?;
        repo.branch(&self.name)?;
        Ok(())
    }
}
