//! Show the working tree status.
//!
//! Five sections, each closed by a blank line: branches (the active one
//! marked with `*`), staged files, removed files, unstaged modifications and
//! untracked files.

use crate::output;
use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;
use gitlet_versioning::StatusReport;

/// Show branches, staged files and working directory changes
#[derive(Parser, Debug)]
pub struct StatusCmd {}

impl StatusCmd {
    pub fn execute(&self) -> Result<()> {
        let repo = open_repository()?;
        let report = repo.status()?;
        for (title, lines) in sections(&report) {
            output::section_list(title, lines);
        }
        Ok(())
    }
}

fn sections(report: &StatusReport) -> [(&'static str, Vec<String>); 5] {
    let branches = report
        .branches
        .iter()
        .map(|name| {
            if *name == report.current_branch {
                format!("*{}", name)
            } else {
                name.clone()
            }
        })
        .collect();
    let modified = report
        .modified
        .iter()
        .map(|(name, change)| format!("{} ({})", name, change))
        .collect();

    [
        ("Branches", branches),
        ("Staged Files", report.staged.clone()),
        ("Removed Files", report.removed.clone()),
        ("Modifications Not Staged For Commit", modified),
        ("Untracked Files", report.untracked.clone()),
    ]
}
