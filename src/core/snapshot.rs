//! Snapshot of the previous run's top-level names, used for changelog diffs.
//!
//! The snapshot carries names only; structure is not tracked. It is
//! overwritten at the end of every run with whatever was extracted, even if
//! some sources failed, so a transient fetch failure shows up as removals in
//! the next diff.

use std::{
    collections::BTreeSet,
    fs,
    path::Path,
};

use anyhow::{Context, Result};
use tracing::warn;

use super::registry::Registry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    names: BTreeSet<String>,
}

/// Counts of names added and removed since the previous snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    pub added: usize,
    pub removed: usize,
}

impl SnapshotDiff {
    pub fn is_empty(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

impl Snapshot {
    pub fn from_names(names: BTreeSet<String>) -> Self {
        Self { names }
    }

    pub fn from_registry(registry: &Registry) -> Self {
        Self::from_names(registry.names())
    }

    pub fn names(&self) -> &BTreeSet<String> {
        &self.names
    }

    /// Load the snapshot at `path`.
    ///
    /// A missing file is an empty snapshot. An unreadable or malformed file
    /// is reported and also treated as empty.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match read_names(path) {
            Ok(names) => Self { names },
            Err(err) => {
                warn!(path = %path.display(), "discarding unreadable snapshot: {:#}", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content =
            serde_json::to_string_pretty(&self.names).context("Failed to serialize snapshot")?;
        fs::write(path, format!("{}\n", content))
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }

    pub fn diff_from(&self, previous: &Snapshot) -> SnapshotDiff {
        diff(&self.names, &previous.names)
    }
}

fn read_names(path: &Path) -> Result<BTreeSet<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

pub fn diff(current: &BTreeSet<String>, previous: &BTreeSet<String>) -> SnapshotDiff {
    SnapshotDiff {
        added: current.difference(previous).count(),
        removed: previous.difference(current).count(),
    }
}
