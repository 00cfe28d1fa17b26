use crate::output;
use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;

/// Print the ids of all commits with exactly the given message, one per line
#[derive(Parser, Debug)]
pub struct FindCmd {
    /// Commit message to search for
    #[arg(value_name = "MESSAGE", allow_hyphen_values = true)]
    pub message: String,
}

impl FindCmd {
    pub fn execute(&self) -> Result<()> {
        let repo = open_repository()?;
        for oid in repo.find(&self.message)? {
            output::message(&oid.to_hex());
        }
        Ok(())
    }
}
