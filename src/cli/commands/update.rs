use std::time::Duration;

use anyhow::{Context, Result};
use tracing::debug;

use super::super::args::UpdateCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::print_update_summary;
use crate::config::{load_config, load_config_file};
use crate::fetch::SourceFetcher;
use crate::pipeline::{self, RunOptions, RunSummary};

pub fn update(cmd: UpdateCommand) -> Result<ExitStatus> {
    let loaded = match &cmd.config {
        Some(path) => load_config_file(path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to get current directory")?;
            load_config(&cwd)?
        }
    };
    if !loaded.from_file {
        debug!("no configuration file found, using defaults");
    }

    let config = loaded.config;
    let paths = config.paths(&loaded.root);
    let fetcher = SourceFetcher::new(
        &paths.root,
        &paths.cache_dir,
        Duration::from_secs(config.timeout_secs),
    )?;

    let options = RunOptions {
        dry_run: cmd.dry_run,
        today: None,
    };
    let summary = pipeline::run(&config, &paths, &fetcher, options)?;
    print_update_summary(&summary, &paths.root);

    Ok(exit_status(&summary))
}

fn exit_status(summary: &RunSummary) -> ExitStatus {
    if summary.failed_sources() > 0 || (summary.dry_run && summary.has_changes()) {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}
