//! Output rendering and change-aware writing.
//!
//! Renderers are pure: registry in, text out, with keys and members in
//! ordinal order so identical input gives byte-identical output. Writing
//! goes through [`write_if_changed`] so unchanged outputs keep their
//! modification time and produce no version-control noise.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::config::{GlobalsStyle, Paths};
use crate::core::Registry;

pub mod changelog;
pub mod json;
pub mod list;
pub mod luacheck;

/// Whether writing `content` to `path` would change anything on disk.
pub fn is_changed(path: &Path, content: &str) -> Result<bool> {
    if !path.exists() {
        return Ok(true);
    }
    let existing =
        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(existing != content.as_bytes())
}

/// Write `content` to `path` unless the file already holds exactly that.
///
/// Returns true if the file was written.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if !is_changed(path, content)? {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    Ok(true)
}

/// The three rendered documents of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutputs {
    pub luacheckrc: String,
    pub globals_list: String,
    pub globals_json: String,
}

impl RenderedOutputs {
    /// Render every output. `existing_luacheckrc` is the current lint config,
    /// whose text outside the `globals` block is preserved.
    pub fn render(
        registry: &Registry,
        existing_luacheckrc: Option<&str>,
        style: GlobalsStyle,
    ) -> Result<Self> {
        Ok(Self {
            luacheckrc: luacheck::render_luacheckrc(registry, existing_luacheckrc, style),
            globals_list: list::render_list(registry),
            globals_json: json::render_json(registry, style)?,
        })
    }

    fn targets<'a>(&'a self, paths: &'a Paths) -> [(&'a Path, &'a str); 3] {
        [
            (paths.luacheckrc.as_path(), self.luacheckrc.as_str()),
            (paths.globals_list.as_path(), self.globals_list.as_str()),
            (paths.globals_json.as_path(), self.globals_json.as_str()),
        ]
    }

    /// Write every output that differs from disk; returns the written paths.
    pub fn write(&self, paths: &Paths) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (path, content) in self.targets(paths) {
            if write_if_changed(path, content)? {
                written.push(path.to_path_buf());
            }
        }
        Ok(written)
    }

    /// Paths that [`RenderedOutputs::write`] would touch.
    pub fn pending(&self, paths: &Paths) -> Result<Vec<PathBuf>> {
        let mut pending = Vec::new();
        for (path, content) in self.targets(paths) {
            if is_changed(path, content)? {
                pending.push(path.to_path_buf());
            }
        }
        Ok(pending)
    }
}

/// Read the current lint config, if any.
pub fn read_existing(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .with_context(|| format!("Failed to read file: {}", path.display()))
}
