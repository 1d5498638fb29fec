//! Quoted string table dialect.
//!
//! ```lua
//! local Events = {
//!     "ADDON_LOADED",
//!     "PLAYER_LOGIN",
//! }
//! ```
//!
//! Each line that is exactly one double-quoted literal (optionally followed
//! by a comma) declares a name. The dotted variant reads `"C_Map.GetMapInfo",`
//! as field `GetMapInfo` of table `C_Map`.

use std::sync::LazyLock;

use regex::Regex;

use super::{DialectParser, lines};
use crate::core::symbol::{SymbolMap, add_field, add_plain, is_symbol_name};

static STRING_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"([^"]+)",?$"#).unwrap());

#[derive(Debug, Clone, Copy)]
pub struct StringTableParser {
    dotted: bool,
}

impl StringTableParser {
    pub fn plain() -> Self {
        Self { dotted: false }
    }

    pub fn dotted() -> Self {
        Self { dotted: true }
    }
}

impl DialectParser for StringTableParser {
    fn parse(&self, content: &str) -> SymbolMap {
        let mut symbols = SymbolMap::new();
        for line in lines(content) {
            let line = line.trim();
            if line.is_empty() || line.starts_with("--") {
                continue;
            }
            let Some(value) = STRING_LINE_REGEX
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
            else {
                continue;
            };

            if self.dotted {
                add_dotted(&mut symbols, value);
            } else if is_symbol_name(value) {
                add_plain(&mut symbols, value);
            }
        }
        symbols
    }
}

/// Add `Table.field` as a field of `Table`, or a bare name as plain.
///
/// Only the first dot splits; anything malformed is dropped.
pub(crate) fn add_dotted(symbols: &mut SymbolMap, value: &str) {
    match value.split_once('.') {
        Some((table, field)) => {
            let field = field.split('.').next().unwrap_or_default();
            if is_symbol_name(table) && is_symbol_name(field) {
                add_field(symbols, table, field);
            }
        }
        None => {
            if is_symbol_name(value) {
                add_plain(symbols, value);
            }
        }
    }
}
