// Gitlet - Local Version Control
// Copyright (C) 2025 Gitlet Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Shared output formatting for CLI commands.
//!
//! Command outcomes go to stdout. Colour is applied through `console`, which
//! turns it off when the stream is not a terminal, so piped output is plain.

use console::style;

/// Print an outcome or report line as-is.
pub fn message(msg: &str) {
    println!("{}", msg);
}

/// Print an infrastructure failure to stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("error:").red().bold(), msg);
}

/// Print a `=== Title ===` section header.
pub fn section(title: &str) {
    println!("{}", style(format!("=== {} ===", title)).bold());
}

/// Print a section header, its lines, and the closing blank line.
pub fn section_list<I, S>(title: &str, lines: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    section(title);
    for line in lines {
        println!("{}", line.as_ref());
    }
    println!();
}
