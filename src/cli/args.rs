//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `update`: Fetch every source and regenerate the outputs
//! - `parse`: Run one dialect over a local file
//! - `init`: Create a `.wowglobalsrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::core::Dialect;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Update(cmd)) => cmd.common.verbose,
            Some(Command::Parse(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Arguments shared by commands that do work.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct UpdateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Configuration file (default: search upwards for .wowglobalsrc.json)
    #[arg(long, env = "WOW_GLOBALS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct ParseCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Dialect the file is written in
    #[arg(value_enum)]
    pub dialect: Dialect,

    /// Local file to parse
    pub file: PathBuf,

    /// Print the JSON rendering instead of one name per line
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every source, merge the globals and regenerate the outputs
    Update(UpdateCommand),
    /// Extract globals from a single local file
    Parse(ParseCommand),
    /// Initialize a new .wowglobalsrc.json configuration file
    Init,
}
