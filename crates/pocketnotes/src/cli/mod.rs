//! Command-line interface for pocketnotes.
//!
//! This module provides the CLI structure for the `pnotes` binary, a
//! terminal front end over [`crate::NotesStore`].

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{ColorArg, ConfigCommand, GroupCommand, NoteCommand, ShowCommand};

/// pnotes - Color-tagged note groups in your terminal
///
/// Create named groups and append timestamped notes to them. Everything is
/// kept in a local database.
#[derive(Debug, Parser)]
#[command(name = "pnotes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create and list groups
    #[command(subcommand)]
    Group(GroupCommand),

    /// Add notes to a group
    #[command(subcommand)]
    Note(NoteCommand),

    /// Show the group list and, optionally, one group's notes
    Show(ShowCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
