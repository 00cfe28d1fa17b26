use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;

/// Stage a file for the next commit
///
/// Stages the current content of FILE. A file whose content matches the
/// current commit is unstaged instead, and a pending removal is cancelled.
#[derive(Parser, Debug)]
pub struct AddCmd {
    /// File to stage
    #[arg(value_name = "FILE")]
    pub file: String,
}

impl AddCmd {
    pub fn execute(&self) -> Result<()> {
        let mut repo = open_repository()?;
        repo.add(&self.file)?;
        Ok(())
    }
}
