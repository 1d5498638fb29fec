//! User-supplied globals.
//!
//! One name per line. Blank lines and lines starting with `#` or `--` are
//! ignored. Surrounding quotes and a trailing comma are tolerated so a
//! string-table style file (`"MyGlobal",`) reads the same as a plain list.
//! `Table.field` declares a field of a table global.

use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::parsers::string_table::add_dotted;
use super::symbol::SymbolMap;

pub const CUSTOM_GLOBALS_TEMPLATE: &str = "\
# Add your own custom globals here, one per line.
# They are merged with the globals extracted from the upstream sources.
# Use Table.field to declare a field of a table global.
# Lines starting with # or -- are ignored.
";

/// Custom globals loaded for a run.
#[derive(Debug, Default)]
pub struct CustomGlobals {
    pub symbols: SymbolMap,
    /// True if the file did not exist and the template was written.
    pub created: bool,
}

pub fn parse_custom_globals(content: &str) -> SymbolMap {
    let mut symbols = SymbolMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("--") {
            continue;
        }
        let line = line.strip_suffix(',').unwrap_or(line).trim();
        let line = unquote(line);
        add_dotted(&mut symbols, line);
    }
    symbols
}

fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    text
}

/// Load the custom globals file.
///
/// A missing file is not an error: the template is written (unless
/// `create_missing` is false) and no symbols are contributed.
pub fn load_custom_globals(path: &Path, create_missing: bool) -> Result<CustomGlobals> {
    if !path.exists() {
        if create_missing {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create directory: {}", parent.display())
                })?;
            }
            fs::write(path, CUSTOM_GLOBALS_TEMPLATE)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
        }
        return Ok(CustomGlobals {
            symbols: SymbolMap::new(),
            created: create_missing,
        });
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(CustomGlobals {
        symbols: parse_custom_globals(&content),
        created: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::Symbol;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_parse_custom_globals() {
        let content = r#"
# comment
-- lua comment
MyAddon
  SLASH_MYADDON1
"QuotedGlobal",
'SingleQuoted'
MyAddonDB.profiles
MyAddonDB.global
not a name
"#;
        let symbols = parse_custom_globals(content);
        assert_eq!(
            symbols,
            SymbolMap::from([
                ("MyAddon".to_string(), Symbol::Plain),
                (
                    "MyAddonDB".to_string(),
                    Symbol::with_fields(["global", "profiles"])
                ),
                ("QuotedGlobal".to_string(), Symbol::Plain),
                ("SLASH_MYADDON1".to_string(), Symbol::Plain),
                ("SingleQuoted".to_string(), Symbol::Plain),
            ])
        );
    }

    #[test]
    fn test_template_parses_to_nothing() {
        assert!(parse_custom_globals(CUSTOM_GLOBALS_TEMPLATE).is_empty());
    }

    #[test]
    fn test_missing_file_creates_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom_globals.txt");

        let custom = load_custom_globals(&path, true).unwrap();

        assert!(custom.created);
        assert!(custom.symbols.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), CUSTOM_GLOBALS_TEMPLATE);
    }

    #[test]
    fn test_missing_file_without_create() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom_globals.txt");

        let custom = load_custom_globals(&path, false).unwrap();

        assert!(!custom.created);
        assert!(!path.exists());
    }

    #[test]
    fn test_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom_globals.txt");
        fs::write(&path, "MyAddon\n").unwrap();

        let custom = load_custom_globals(&path, true).unwrap();

        assert!(!custom.created);
        assert_eq!(custom.symbols.len(), 1);
    }
}
