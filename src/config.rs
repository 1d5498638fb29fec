use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

use crate::core::Dialect;

pub const CONFIG_FILE_NAME: &str = ".wowglobalsrc.json";

const RESOURCES_BASE_URL: &str =
    "https://raw.githubusercontent.com/Ketho/BlizzardInterfaceResources/mainline/Resources";

/// One upstream text source and the dialect it is written in.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceConfig {
    pub name: String,
    /// `http(s)://` URL, `file://` URL, or a path relative to the config root.
    pub url: String,
    pub dialect: Dialect,
}

impl SourceConfig {
    pub fn new(name: &str, url: &str, dialect: Dialect) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            dialect,
        }
    }
}

/// How much structure the emitted documents carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlobalsStyle {
    /// Tables are emitted with their `fields`.
    #[default]
    Structured,
    /// Only top-level names are emitted.
    Flat,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
    #[serde(default = "default_custom_globals")]
    pub custom_globals: String,
    #[serde(default = "default_luacheckrc")]
    pub luacheckrc: String,
    #[serde(default = "default_globals_list")]
    pub globals_list: String,
    #[serde(default = "default_globals_json")]
    pub globals_json: String,
    #[serde(default = "default_snapshot")]
    pub snapshot: String,
    /// Changelog file to append a diff line to; disabled when unset.
    #[serde(default)]
    pub changelog: Option<String>,
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,
    #[serde(default)]
    pub style: GlobalsStyle,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_sources() -> Vec<SourceConfig> {
    [
        ("GlobalStrings", "GlobalStrings/enUS.lua", Dialect::Assignment),
        ("Events", "Events.lua", Dialect::StringTable),
        ("Frames", "Frames.lua", Dialect::StringTable),
        ("GlobalAPI", "GlobalAPI.lua", Dialect::Api),
        ("LuaEnum", "LuaEnum.lua", Dialect::Enums),
        ("Mixins", "Mixins.lua", Dialect::StringTable),
    ]
    .into_iter()
    .map(|(name, file, dialect)| {
        SourceConfig::new(name, &format!("{}/{}", RESOURCES_BASE_URL, file), dialect)
    })
    .collect()
}

fn default_custom_globals() -> String {
    "custom_globals.txt".to_string()
}

fn default_luacheckrc() -> String {
    ".luacheckrc".to_string()
}

fn default_globals_list() -> String {
    "wow_globals.lua".to_string()
}

fn default_globals_json() -> String {
    "wow_globals.json".to_string()
}

fn default_snapshot() -> String {
    ".cache/globals_snapshot.json".to_string()
}

fn default_cache_dir() -> String {
    ".cache".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            custom_globals: default_custom_globals(),
            luacheckrc: default_luacheckrc(),
            globals_list: default_globals_list(),
            globals_json: default_globals_json(),
            snapshot: default_snapshot(),
            changelog: None,
            cache_dir: default_cache_dir(),
            style: GlobalsStyle::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Every file location a run touches, resolved against the config root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub root: PathBuf,
    pub custom_globals: PathBuf,
    pub luacheckrc: PathBuf,
    pub globals_list: PathBuf,
    pub globals_json: PathBuf,
    pub snapshot: PathBuf,
    pub changelog: Option<PathBuf>,
    pub cache_dir: PathBuf,
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if there are no sources, a source has an empty name
    /// or URL, or two sources share a name.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            bail!("'sources' must list at least one source");
        }

        let mut seen = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                bail!("Source with url \"{}\" has an empty name", source.url);
            }
            if source.url.trim().is_empty() {
                bail!("Source \"{}\" has an empty url", source.name);
            }
            if !seen.insert(source.name.as_str()) {
                bail!("Duplicate source name in 'sources': \"{}\"", source.name);
            }
        }

        if self.timeout_secs == 0 {
            bail!("'timeoutSecs' must be greater than zero");
        }

        Ok(())
    }

    pub fn paths(&self, root: &Path) -> Paths {
        Paths {
            root: root.to_path_buf(),
            custom_globals: root.join(&self.custom_globals),
            luacheckrc: root.join(&self.luacheckrc),
            globals_list: root.join(&self.globals_list),
            globals_json: root.join(&self.globals_json),
            snapshot: root.join(&self.snapshot),
            changelog: self.changelog.as_ref().map(|path| root.join(path)),
            cache_dir: root.join(&self.cache_dir),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config resolve against.
    pub root: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config_file(path: &Path) -> Result<ConfigLoadResult> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config.validate()?;
    let root = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(ConfigLoadResult {
        config,
        root,
        from_file: true,
    })
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => load_config_file(&path),
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            root: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
