//! Command-line interface layer.

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
pub mod report;

pub use args::{Arguments, Command, CommonArgs, ParseCommand, UpdateCommand};
pub use exit_status::ExitStatus;

use crate::logging;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    logging::init(args.verbose());

    let Some(Arguments { command }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Update(cmd)) => commands::update::update(cmd),
        Some(Command::Parse(cmd)) => commands::parse::parse(cmd),
        Some(Command::Init) => commands::init::init(),
        None => Ok(ExitStatus::Success),
    }
}
