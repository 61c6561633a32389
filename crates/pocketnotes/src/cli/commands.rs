//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::model::Color;

/// Group management commands.
#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// Create a new group
    Create {
        /// Group name (at least 2 characters, unique ignoring case)
        name: String,

        /// Avatar color
        #[arg(long, value_enum, default_value = "purple")]
        color: ColorArg,
    },

    /// List all groups
    List {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

/// Note commands.
#[derive(Debug, Subcommand)]
pub enum NoteCommand {
    /// Append a note to a group
    Add {
        /// Name of the group (case-insensitive)
        group: String,

        /// Note text
        text: String,
    },
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Group to open; omit to show only the group list
    pub group: Option<String>,

    /// Output the group as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Palette color argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorArg {
    /// #B38BFA
    Purple,
    /// #FF79F2
    Pink,
    /// #43E6FC
    Cyan,
    /// #F19576
    Peach,
    /// #0047FF
    Blue,
    /// #6691FF
    Periwinkle,
}

impl From<ColorArg> for Color {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Purple => Self::Purple,
            ColorArg::Pink => Self::Pink,
            ColorArg::Cyan => Self::Cyan,
            ColorArg::Peach => Self::Peach,
            ColorArg::Blue => Self::Blue,
            ColorArg::Periwinkle => Self::Periwinkle,
        }
    }
}
