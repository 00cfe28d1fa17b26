//! Merge a branch into the current branch.
//!
//! Prints one of:
//!
//! ```text
//! Given branch is an ancestor of the current branch.
//! Current branch fast-forwarded.
//! Merged BRANCH into CURRENT.
//! ```
//!
//! The last is preceded by `Encountered a merge conflict.` when any file
//! received a conflict blob.

use crate::output;
use crate::repo::open_repository;
use anyhow::Result;
use clap::Parser;
use gitlet_versioning::{MergeOutcome, MergeReport};
use tracing::debug;

/// Merge a branch into the current branch
#[derive(Parser, Debug)]
pub struct MergeCmd {
    /// Branch to merge in
    #[arg(value_name = "BRANCH")]
    pub branch: String,
}

impl MergeCmd {
    pub fn execute(&self) -> Result<()> {
        let mut repo = open_repository()?;
        let report = repo.merge(&self.branch)?;
        for line in report_lines(&report) {
            output::message(&line);
        }
        Ok(())
    }
}

fn report_lines(report: &MergeReport) -> Vec<String> {
    match &report.outcome {
        MergeOutcome::AlreadyAncestor => {
            vec!["Given branch is an ancestor of the current branch.".to_string()]
        }
        MergeOutcome::FastForward => vec!["Current branch fast-forwarded.".to_string()],
        MergeOutcome::Merged { commit, conflicts } => {
            for conflict in conflicts {
                debug!(commit = %commit, conflict = %conflict, "Conflicted file");
            }
            let mut lines = Vec::new();
            if report.has_conflicts() {
                lines.push("Encountered a merge conflict.".to_string());
            }
            lines.push(format!("Merged {} into {}.", report.given, report.current));
            lines
        }
    }
}
