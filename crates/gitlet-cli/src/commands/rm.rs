use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;

/// Unstage a file, or stage its removal
///
/// A file tracked by the current commit is staged for removal and deleted
/// from the working directory.
#[derive(Parser, Debug)]
pub struct RmCmd {
    /// File to remove
    #[arg(value_name = "FILE")]
    pub file: String,
}

impl RmCmd {
    pub fn execute(&self) -> Result<()> {
        let mut repo = open_repository()?;
        repo.rm(&self.file)?;
        Ok(())
    }
}
