//! The update run: fetch, parse, merge, diff, emit.
//!
//! Sources are processed one at a time in configured order. A source that
//! fails to fetch or yields nothing is recorded and skipped; the run only
//! fails as a whole when nothing at all was extracted, and in that case it
//! fails before touching any output.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{Config, Paths, SourceConfig};
use crate::core::custom::load_custom_globals;
use crate::core::{Dialect, Registry, Snapshot, SnapshotDiff, merge, parse};
use crate::emit::{self, RenderedOutputs, changelog};
use crate::fetch::Fetcher;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("No globals extracted: every source failed and no custom globals are defined")]
    NoGlobals,
}

/// What happened to one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// Parsed into this many top-level symbols.
    Parsed { symbols: usize },
    /// Fetched, but nothing matched the dialect.
    Empty,
    FetchFailed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReport {
    pub name: String,
    pub dialect: Dialect,
    pub outcome: SourceOutcome,
}

impl SourceReport {
    /// The source could not be read. An empty source is not a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, SourceOutcome::FetchFailed { .. })
    }

    pub fn is_empty(&self) -> bool {
        self.outcome == SourceOutcome::Empty
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Compute everything but write nothing.
    pub dry_run: bool,
    /// Date for the changelog line; today when unset.
    pub today: Option<NaiveDate>,
}

#[derive(Debug)]
pub struct RunSummary {
    pub sources: Vec<SourceReport>,
    pub custom_count: usize,
    /// The custom globals template was written during this run.
    pub custom_created: bool,
    pub total: usize,
    pub structured: usize,
    pub diff: SnapshotDiff,
    /// Outputs written, or in a dry run, outputs that would be written.
    pub changed_files: Vec<PathBuf>,
    pub changelog_line: Option<String>,
    pub dry_run: bool,
}

impl RunSummary {
    pub fn failed_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.is_failure()).count()
    }

    pub fn empty_sources(&self) -> usize {
        self.sources.iter().filter(|s| s.is_empty()).count()
    }

    pub fn has_changes(&self) -> bool {
        !self.changed_files.is_empty()
    }
}

/// Fetch and parse every source, folding the results into one registry.
pub fn collect_sources(
    sources: &[SourceConfig],
    fetcher: &dyn Fetcher,
) -> (Registry, Vec<SourceReport>) {
    let mut registry = Registry::new();
    let mut reports = Vec::with_capacity(sources.len());

    for source in sources {
        let outcome = match fetcher.fetch(source) {
            Ok(text) => {
                let symbols = parse(source.dialect, &text);
                if symbols.is_empty() {
                    warn!(source = %source.name, dialect = %source.dialect, "no globals matched");
                    SourceOutcome::Empty
                } else {
                    let count = symbols.len();
                    info!(source = %source.name, dialect = %source.dialect, count, "parsed");
                    registry = merge(registry, symbols);
                    SourceOutcome::Parsed { symbols: count }
                }
            }
            Err(err) => {
                warn!(source = %source.name, "fetch failed: {:#}", err);
                SourceOutcome::FetchFailed {
                    error: format!("{:#}", err),
                }
            }
        };
        reports.push(SourceReport {
            name: source.name.clone(),
            dialect: source.dialect,
            outcome,
        });
    }

    (registry, reports)
}

pub fn run(
    config: &Config,
    paths: &Paths,
    fetcher: &dyn Fetcher,
    options: RunOptions,
) -> Result<RunSummary> {
    let (registry, sources) = collect_sources(&config.sources, fetcher);

    let custom = load_custom_globals(&paths.custom_globals, !options.dry_run)?;
    if custom.created {
        info!(path = %paths.custom_globals.display(), "created custom globals template");
    }
    let custom_count = custom.symbols.len();
    let registry = merge(registry, custom.symbols);

    if registry.is_empty() {
        return Err(PipelineError::NoGlobals.into());
    }

    let current = Snapshot::from_registry(&registry);
    let previous = Snapshot::load(&paths.snapshot);
    let diff = current.diff_from(&previous);
    debug!(added = diff.added, removed = diff.removed, "diff against snapshot");

    let existing = emit::read_existing(&paths.luacheckrc)?;
    let outputs = RenderedOutputs::render(&registry, existing.as_deref(), config.style)?;

    let changelog_line = match &paths.changelog {
        Some(_) if !diff.is_empty() => {
            let today = options.today.unwrap_or_else(|| Local::now().date_naive());
            Some(changelog::changelog_line(today, diff, registry.len()))
        }
        _ => None,
    };

    let changed_files = if options.dry_run {
        outputs.pending(paths)?
    } else {
        let written = outputs.write(paths)?;
        current.save(&paths.snapshot)?;
        if let (Some(path), Some(line)) = (&paths.changelog, &changelog_line) {
            changelog::append_changelog(path, line)?;
        }
        written
    };

    Ok(RunSummary {
        sources,
        custom_count,
        custom_created: custom.created,
        total: registry.len(),
        structured: registry.structured_count(),
        diff,
        changed_files,
        changelog_line,
        dry_run: options.dry_run,
    })
}
