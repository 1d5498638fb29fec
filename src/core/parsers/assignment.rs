//! Bare assignment dialect: `NAME = value`.
//!
//! The strict variant only accepts uppercase names at column 0, which is
//! how GlobalStrings dumps are written. The relaxed variant accepts any
//! identifier with leading whitespace plus explicit `_G` writes.

use std::sync::LazyLock;

use regex::Regex;

use super::{DialectParser, lines};
use crate::core::symbol::{SymbolMap, add_plain, is_symbol_name};

static STRICT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z0-9_]+)[ \t]*=").unwrap());

static RELAXED_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z0-9_]+)\s*=").unwrap());

/// `_G["NAME"] =`, `_G['NAME'] =` and `_G.NAME =`.
static GLOBAL_TABLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*_G(?:\[\s*["']([^"']+)["']\s*\]|\.([A-Za-z_][A-Za-z0-9_]*))\s*="#).unwrap()
});

#[derive(Debug, Clone, Copy)]
pub struct AssignmentParser {
    relaxed: bool,
}

impl AssignmentParser {
    pub fn strict() -> Self {
        Self { relaxed: false }
    }

    pub fn relaxed() -> Self {
        Self { relaxed: true }
    }

    fn match_line<'a>(&self, line: &'a str) -> Option<&'a str> {
        if !self.relaxed {
            return STRICT_REGEX
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str());
        }

        if let Some(caps) = RELAXED_REGEX.captures(line) {
            return caps.get(1).map(|m| m.as_str());
        }
        GLOBAL_TABLE_REGEX
            .captures(line)
            .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().trim())
    }
}

impl DialectParser for AssignmentParser {
    fn parse(&self, content: &str) -> SymbolMap {
        let mut symbols = SymbolMap::new();
        for line in lines(content) {
            if let Some(name) = self.match_line(line)
                && is_symbol_name(name)
            {
                add_plain(&mut symbols, name);
            }
        }
        symbols
    }
}
