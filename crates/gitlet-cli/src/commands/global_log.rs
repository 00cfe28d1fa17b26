use super::log::print_entry;
use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;

/// Show every commit ever made, in id order
#[derive(Parser, Debug)]
pub struct GlobalLogCmd {}

impl GlobalLogCmd {
    pub fn execute(&self) -> Result<()> {
        let repo = open_repository()?;
        for entry in repo.global_log()? {
            print_entry(&entry);
        }
        Ok(())
    }
}
