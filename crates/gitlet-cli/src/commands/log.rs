//! Show commit history.
//!
//! `log` walks first parents from HEAD back to the initial commit. Entries are
//! shared with `global-log`.

use crate::repo::open_repository;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use clap::Parser;
use console::style;
use gitlet_versioning::{LogEntry, Parents};

/// Timestamp format of the `Date:` line
pub const DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Length of the parent ids on the `Merge:` line
const MERGE_ID_LEN: usize = 7;

/// Show the history of the current branch
#[derive(Parser, Debug)]
pub struct LogCmd {}

impl LogCmd {
    pub fn execute(&self) -> Result<()> {
        let repo = open_repository()?;
        for entry in repo.log()? {
            print_entry(&entry);
        }
        Ok(())
    }
}

/// Print one history entry followed by a blank line
pub fn print_entry(entry: &LogEntry) {
    let mut lines = entry_lines(entry);
    lines[1] = style(&lines[1]).yellow().to_string();
    for line in lines {
        println!("{}", line);
    }
    println!();
}

/// Lines of a history entry, without the trailing blank line
pub fn entry_lines(entry: &LogEntry) -> Vec<String> {
    let mut lines = vec!["===".to_string(), format!("commit {}", entry.oid)];
    if let Parents::Merge(current, given) = entry.commit.parents {
        lines.push(format!(
            "Merge: {} {}",
            current.short(MERGE_ID_LEN),
            given.short(MERGE_ID_LEN)
        ));
    }
    lines.push(format!("Date: {}", format_date(&entry.commit.timestamp)));
    lines.push(entry.commit.message.clone());
    lines
}

/// Render a commit time in the local time zone
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format(DATE_FORMAT).to_string()
}
