//! UI markup dialect: every `name="..."` attribute names a global frame.
//!
//! Names relative to a parent (`$parentButton`) and anything that is not a
//! plain identifier are skipped.

use std::sync::LazyLock;

use regex::Regex;

use super::DialectParser;
use crate::core::symbol::{SymbolMap, add_plain, is_symbol_name};

static NAME_ATTRIBUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bname\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct XmlNameParser;

impl DialectParser for XmlNameParser {
    fn parse(&self, content: &str) -> SymbolMap {
        let mut symbols = SymbolMap::new();
        for caps in NAME_ATTRIBUTE_REGEX.captures_iter(content) {
            let Some(value) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };
            let name = value.as_str().trim();
            if is_symbol_name(name) {
                add_plain(&mut symbols, name);
            }
        }
        symbols
    }
}
