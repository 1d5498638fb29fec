//! Changelog of globals churn, one dated line per run that changed the
//! set of top-level names.

use std::{fs::OpenOptions, io::Write, path::Path};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::core::SnapshotDiff;

/// `- 2024-05-01: +3 / -1 globals (1200 total)`
pub fn changelog_line(date: NaiveDate, diff: SnapshotDiff, total: usize) -> String {
    format!(
        "- {}: +{} / -{} globals ({} total)",
        date.format("%Y-%m-%d"),
        diff.added,
        diff.removed,
        total
    )
}

/// Append `line` to the changelog at `path`, creating it if needed.
pub fn append_changelog(path: &Path, line: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open changelog: {}", path.display()))?;
    writeln!(file, "{}", line)
        .with_context(|| format!("Failed to write changelog: {}", path.display()))
}
