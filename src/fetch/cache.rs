//! On-disk cache of downloaded source bodies.
//!
//! Each source owns `<name>.txt` and `<name>.txt.meta`; the meta file holds
//! the validators sent back on the next request.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl CacheMeta {
    pub fn is_empty(&self) -> bool {
        self.etag.is_none() && self.last_modified.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct SourceCache {
    dir: PathBuf,
}

impl SourceCache {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    pub fn body_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.txt", cache_file_stem(name)))
    }

    pub fn meta_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.txt.meta", cache_file_stem(name)))
    }

    /// Validators for a cached body, if both the body and a readable meta
    /// file exist.
    pub fn load_meta(&self, name: &str) -> Option<CacheMeta> {
        let meta_path = self.meta_path(name);
        if !self.body_path(name).exists() || !meta_path.exists() {
            return None;
        }
        let parsed = fs::read_to_string(&meta_path)
            .map_err(anyhow::Error::from)
            .and_then(|content| serde_json::from_str::<CacheMeta>(&content).map_err(Into::into));
        match parsed {
            Ok(meta) if !meta.is_empty() => Some(meta),
            Ok(_) => None,
            Err(err) => {
                warn!(path = %meta_path.display(), "discarding cache metadata: {}", err);
                None
            }
        }
    }

    pub fn read_body(&self, name: &str) -> Result<String> {
        let path = self.body_path(name);
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cached source: {}", path.display()))
    }

    /// Store `body` and `meta`; the body goes through a temp file so a
    /// failed write never leaves a truncated cache entry.
    pub fn store(&self, name: &str, body: &str, meta: &CacheMeta) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create directory: {}", self.dir.display()))?;

        let body_path = self.body_path(name);
        let tmp_path = body_path.with_extension("txt.tmp");
        fs::write(&tmp_path, body)
            .with_context(|| format!("Failed to write file: {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &body_path)
            .with_context(|| format!("Failed to replace file: {}", body_path.display()))?;

        let meta_path = self.meta_path(name);
        let content = serde_json::to_string(meta).context("Failed to serialize cache metadata")?;
        fs::write(&meta_path, content)
            .with_context(|| format!("Failed to write file: {}", meta_path.display()))
    }
}

/// File-system safe stem for a source name.
fn cache_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
