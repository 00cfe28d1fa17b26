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

//! Mapping of command-line parse failures onto outcome messages
//!
//! A malformed invocation is reported like any other failed command: one
//! line on stdout and exit code 0. The checks run in a fixed order: missing
//! command, unknown command, repository presence, operand shape.

use crate::{output, repo, Cli};
use clap::error::ErrorKind;
use clap::CommandFactory;
use gitlet_versioning::VcsError;
use std::process::ExitCode;

/// Printed when no command is given
pub const NO_COMMAND: &str = "Please enter a command.";

/// Printed for an unrecognised command name
pub const UNKNOWN_COMMAND: &str = "No command with that name exists.";

/// Report a clap error and choose the exit code
pub fn report_parse_error(err: &clap::Error, args: &[String]) -> ExitCode {
    if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        // --help and --version print to stdout
        err.print().ok();
        return ExitCode::SUCCESS;
    }

    let initialized = repo::current_root()
        .map(|root| repo::is_initialized(&root))
        .unwrap_or(false);
    output::message(&parse_error_message(args, initialized));
    ExitCode::SUCCESS
}

/// Outcome line for arguments clap rejected
pub fn parse_error_message(args: &[String], initialized: bool) -> String {
    let Some(name) = args.iter().find(|arg| !arg.starts_with('-')) else {
        return NO_COMMAND.to_string();
    };

    if Cli::command().find_subcommand(name).is_none() {
        return UNKNOWN_COMMAND.to_string();
    }
    if name != "init" && !initialized {
        return VcsError::NotInitialized.to_string();
    }
    VcsError::InvalidArguments.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_command() {
        assert_eq!(parse_error_message(&args(&[]), true), NO_COMMAND);
        assert_eq!(parse_error_message(&args(&["--bogus"]), true), NO_COMMAND);
    }

    #[test]
    fn test_unknown_command_checked_before_repository() {
        assert_eq!(parse_error_message(&args(&["push"]), false), UNKNOWN_COMMAND);
        assert_eq!(parse_error_message(&args(&["-v", "push", "x"]), true), UNKNOWN_COMMAND);
    }

    #[test]
    fn test_repository_checked_before_operands() {
        assert_eq!(
            parse_error_message(&args(&["log", "extra"]), false),
            "Not in an initialized Gitlet directory."
        );
        assert_eq!(
            parse_error_message(&args(&["init", "extra"]), false),
            "Incorrect operands."
        );
    }

    #[test]
    fn test_incorrect_operands() {
        assert_eq!(
            parse_error_message(&args(&["rm-branch"]), true),
            "Incorrect operands."
        );
        assert_eq!(
            parse_error_message(&args(&["checkout", "a", "b"]), true),
            "Incorrect operands."
        );
    }

    #[test]
    fn test_cli_parses_command_shapes() {
        let cli = Cli::try_parse_from(["gitlet", "checkout", "--", "f.txt"]).unwrap();
        assert!(cli.command.is_some());
        assert!(Cli::try_parse_from(["gitlet", "global-log"]).is_ok());
        assert!(Cli::try_parse_from(["gitlet", "rm-branch", "dev"]).is_ok());
        assert!(Cli::try_parse_from(["gitlet", "commit"]).is_ok());
        assert!(Cli::try_parse_from(["gitlet", "status", "extra"]).is_err());
        assert!(Cli::try_parse_from(["gitlet", "checkout", "a", "b"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
