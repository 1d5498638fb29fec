//! Report formatting and printing utilities.
//!
//! Separate from the pipeline so wow-globals can be used as a library.

use std::{
    io::{self, Write},
    path::Path,
};

use colored::Colorize;

use crate::pipeline::{RunSummary, SourceOutcome, SourceReport};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 { one } else { many }
}

/// Print the outcome of an update run to stdout.
pub fn print_update_summary(summary: &RunSummary, root: &Path) {
    print_update_summary_to(summary, root, &mut io::stdout().lock());
}

pub fn print_update_summary_to<W: Write>(summary: &RunSummary, root: &Path, writer: &mut W) {
    for source in &summary.sources {
        print_source(source, writer);
    }

    if summary.custom_count > 0 {
        let _ = writeln!(
            writer,
            "  {} custom: {} {}",
            SUCCESS_MARK.green(),
            summary.custom_count,
            plural(summary.custom_count, "global", "globals")
        );
    }
    if summary.custom_created {
        let _ = writeln!(
            writer,
            "{} created custom globals template",
            "note:".bold().cyan()
        );
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "{} {} ({} {}), +{} / -{} since last run",
            summary.total,
            plural(summary.total, "global", "globals"),
            summary.structured,
            plural(summary.structured, "table", "tables"),
            summary.diff.added,
            summary.diff.removed
        )
        .green()
    );

    if summary.changed_files.is_empty() {
        let _ = writeln!(writer, "Outputs are up to date");
    } else {
        let verb = if summary.dry_run { "Would update" } else { "Updated" };
        for path in &summary.changed_files {
            let shown = path.strip_prefix(root).unwrap_or(path);
            let _ = writeln!(writer, "{} {}", verb, shown.display());
        }
    }

    if let Some(line) = &summary.changelog_line
        && !summary.dry_run
    {
        let _ = writeln!(writer, "Changelog: {}", line);
    }

    let failed = summary.failed_sources();
    if failed > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} could not be fetched (use {} for details)",
            "warning:".bold().yellow(),
            failed,
            plural(failed, "source", "sources"),
            "-v".cyan()
        );
    }
    let empty = summary.empty_sources();
    if empty > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} matched no globals",
            "warning:".bold().yellow(),
            empty,
            plural(empty, "source", "sources")
        );
    }
}

fn print_source<W: Write>(source: &SourceReport, writer: &mut W) {
    match &source.outcome {
        SourceOutcome::Parsed { symbols } => {
            let _ = writeln!(
                writer,
                "  {} {} ({}): {} {}",
                SUCCESS_MARK.green(),
                source.name,
                source.dialect.to_string().dimmed(),
                symbols,
                plural(*symbols, "global", "globals")
            );
        }
        SourceOutcome::Empty => {
            let _ = writeln!(
                writer,
                "  {} {} ({}): {}",
                FAILURE_MARK.yellow(),
                source.name,
                source.dialect.to_string().dimmed(),
                "no globals matched".yellow()
            );
        }
        SourceOutcome::FetchFailed { error } => {
            let _ = writeln!(
                writer,
                "  {} {} ({}): {}",
                FAILURE_MARK.red(),
                source.name,
                source.dialect.to_string().dimmed(),
                error.red()
            );
        }
    }
}

/// Print names one per line; `Table.field` for members.
pub fn print_names_to<W, I, S>(names: I, writer: &mut W)
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for name in names {
        let _ = writeln!(writer, "{}", name.as_ref());
    }
}
