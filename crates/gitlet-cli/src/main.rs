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

mod commands;
mod dispatch;
mod output;
mod repo;

use clap::{Parser, Subcommand};
use commands::*;
use gitlet_config::Config;
use gitlet_observability::{init_tracing_with_config, LogConfig, LogFormat};
use gitlet_versioning::VcsError;
use std::process::ExitCode;
use tracing::warn;

#[derive(Parser)]
#[command(name = "gitlet")]
#[command(version, about = "A small local version-control system")]
#[command(
    long_about = "Gitlet tracks snapshots of a flat working directory. Files are staged with
`add` and `rm`, recorded with `commit`, and combined across branches with `merge`."
)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new repository in the current directory
    Init(InitCmd),

    /// Stage a file for the next commit
    Add(AddCmd),

    /// Record the staged changes
    Commit(CommitCmd),

    /// Unstage a file, or stage its removal
    Rm(RmCmd),

    /// Show the history of the current branch
    Log(LogCmd),

    /// Show every commit ever made
    #[command(name = "global-log")]
    GlobalLog(GlobalLogCmd),

    /// Print the ids of commits with a given message
    Find(FindCmd),

    /// Show branches, staged files and working directory changes
    Status(StatusCmd),

    /// Restore a file or switch branches
    Checkout(CheckoutCmd),

    /// Create a branch at the current commit
    Branch(BranchCmd),

    /// Delete a branch pointer
    #[command(name = "rm-branch")]
    RmBranch(RmBranchCmd),

    /// Move the current branch to a commit
    Reset(ResetCmd),

    /// Merge a branch into the current branch
    Merge(MergeCmd),
}

impl Commands {
    fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Init(cmd) => cmd.execute(),
            Commands::Add(cmd) => cmd.execute(),
            Commands::Commit(cmd) => cmd.execute(),
            Commands::Rm(cmd) => cmd.execute(),
            Commands::Log(cmd) => cmd.execute(),
            Commands::GlobalLog(cmd) => cmd.execute(),
            Commands::Find(cmd) => cmd.execute(),
            Commands::Status(cmd) => cmd.execute(),
            Commands::Checkout(cmd) => cmd.execute(),
            Commands::Branch(cmd) => cmd.execute(),
            Commands::RmBranch(cmd) => cmd.execute(),
            Commands::Reset(cmd) => cmd.execute(),
            Commands::Merge(cmd) => cmd.execute(),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let args: Vec<String> = std::env::args().skip(1).collect();
            return dispatch::report_parse_error(&err, &args);
        }
    };

    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        output::message(dispatch::NO_COMMAND);
        return ExitCode::SUCCESS;
    };

    match command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

/// Print a failed command's outcome
///
/// Repository errors are ordinary outcomes: one line on stdout and a zero
/// exit code. Anything else is an infrastructure failure.
fn report_error(err: &anyhow::Error) -> ExitCode {
    if let Some(vcs) = err.downcast_ref::<VcsError>() {
        if vcs.is_user_error() {
            output::message(&vcs.to_string());
            return ExitCode::SUCCESS;
        }
    }
    output::error(&format!("{:#}", err));
    ExitCode::FAILURE
}

/// Install the log subscriber from the repository config
///
/// An unreadable config never blocks a command; the defaults are used and
/// the problem is logged once logging is up.
fn init_logging(verbose: bool) {
    let (config, problem) = match repo::current_root().map(Config::load) {
        Ok(Ok(config)) => (config, None),
        Ok(Err(err)) => (Config::default(), Some(err.to_string())),
        Err(err) => (Config::default(), Some(format!("{:#}", err))),
    };

    let format = config
        .observability
        .log_format
        .parse::<LogFormat>()
        .unwrap_or_default();
    let mut log_config = LogConfig::new()
        .with_format(format)
        .with_color(console::colors_enabled_stderr());

    if verbose {
        log_config = log_config.with_level("debug");
    } else if std::env::var_os("RUST_LOG").is_none() {
        log_config = log_config.with_level(config.observability.log_level);
    }

    init_tracing_with_config(log_config).ok(); // Ignore errors if already initialized

    if let Some(problem) = problem {
        warn!(error = %problem, "Ignoring repository configuration");
    }
}
