//! Source retrieval.
//!
//! The pipeline only sees the [`Fetcher`] trait. [`SourceFetcher`] reads
//! local files and downloads remote ones with conditional requests against
//! a per-source cache; [`StaticFetcher`] serves fixed text for tests and
//! offline runs.
//!
//! A local source may also name a directory, such as an extracted copy of
//! the interface code. Every file with the dialect's extension below it is
//! read in path order and the texts are joined.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, anyhow, bail};
use reqwest::{
    StatusCode,
    blocking::{Client, Response},
    header::{ETAG, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED},
};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::SourceConfig;

pub mod cache;

pub use cache::{CacheMeta, SourceCache};

pub trait Fetcher {
    /// Raw text of `source`.
    fn fetch(&self, source: &SourceConfig) -> Result<String>;
}

/// Serves text by source name.
#[derive(Debug, Default, Clone)]
pub struct StaticFetcher {
    texts: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, text: &str) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: &str, text: &str) {
        self.texts.insert(name.to_string(), text.to_string());
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, source: &SourceConfig) -> Result<String> {
        self.texts
            .get(&source.name)
            .cloned()
            .ok_or_else(|| anyhow!("No text registered for source \"{}\"", source.name))
    }
}

/// Where a source URL points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation<'a> {
    Remote(&'a str),
    Local(PathBuf),
}

impl<'a> SourceLocation<'a> {
    /// Classify `url`; local paths resolve against `root`.
    pub fn parse(url: &'a str, root: &Path) -> Self {
        if url.starts_with("http://") || url.starts_with("https://") {
            return Self::Remote(url);
        }
        let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
        if path.is_absolute() {
            Self::Local(path.to_path_buf())
        } else {
            Self::Local(root.join(path))
        }
    }
}

/// Fetches local files directly and remote files through the cache.
pub struct SourceFetcher {
    root: PathBuf,
    cache: SourceCache,
    client: Client,
}

impl SourceFetcher {
    pub fn new(root: &Path, cache_dir: &Path, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("wow-globals/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(root, cache_dir, client))
    }

    pub fn with_client(root: &Path, cache_dir: &Path, client: Client) -> Self {
        Self {
            root: root.to_path_buf(),
            cache: SourceCache::new(cache_dir),
            client,
        }
    }

    fn fetch_local(&self, source: &SourceConfig, path: &Path) -> Result<String> {
        if path.is_dir() {
            return read_directory(path, source.dialect.file_extension());
        }
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))
    }

    fn fetch_remote(&self, source: &SourceConfig, url: &str) -> Result<String> {
        let cached = self.cache.load_meta(&source.name);

        let mut request = self.client.get(url);
        if let Some(meta) = &cached {
            if let Some(etag) = &meta.etag {
                request = request.header(IF_NONE_MATCH, etag);
            }
            if let Some(last_modified) = &meta.last_modified {
                request = request.header(IF_MODIFIED_SINCE, last_modified);
            }
        }

        let response = request
            .send()
            .with_context(|| format!("Failed to download {}", url))?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED && cached.is_some() {
            debug!(source = %source.name, "not modified, using cached copy");
            return self.cache.read_body(&source.name);
        }
        if !status.is_success() {
            bail!("Failed to download {}: HTTP {}", url, status);
        }

        let meta = CacheMeta {
            etag: header_value(&response, ETAG),
            last_modified: header_value(&response, LAST_MODIFIED),
        };
        let body = response
            .text()
            .with_context(|| format!("Failed to read response body from {}", url))?;
        debug!(source = %source.name, bytes = body.len(), "downloaded");

        if let Err(err) = self.cache.store(&source.name, &body, &meta) {
            warn!(source = %source.name, "failed to cache download: {:#}", err);
        }
        Ok(body)
    }
}

impl Fetcher for SourceFetcher {
    fn fetch(&self, source: &SourceConfig) -> Result<String> {
        match SourceLocation::parse(&source.url, &self.root) {
            SourceLocation::Remote(url) => self.fetch_remote(source, url),
            SourceLocation::Local(path) => self.fetch_local(source, &path),
        }
    }
}

/// Joined text of every `*.<extension>` file under `dir`.
fn read_directory(dir: &Path, extension: &str) -> Result<String> {
    let mut texts = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("cannot access path: {}", e);
                continue;
            }
        };
        let path = entry.path();
        let matches = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if !entry.file_type().is_file() || !matches {
            continue;
        }
        // Interface dumps are not always valid UTF-8.
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read source file: {}", path.display()))?;
        texts.push(String::from_utf8_lossy(&bytes).into_owned());
    }
    if texts.is_empty() {
        bail!("No .{} files found under {}", extension, dir.display());
    }
    debug!(dir = %dir.display(), files = texts.len(), "read source directory");
    Ok(texts.join("\n"))
}

fn header_value(response: &Response, name: HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
