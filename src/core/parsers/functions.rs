//! Function definition dialect: `function Name(...)`.
//!
//! Method definitions (`function Frame:OnLoad()`) declare `Frame`.
//! Dotted definitions (`function C_Map.GetMapInfo()`) declare field
//! `GetMapInfo` of table `C_Map`.

use std::sync::LazyLock;

use regex::Regex;

use super::{DialectParser, lines};
use super::string_table::add_dotted;
use crate::core::symbol::SymbolMap;

static FUNCTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*function\s+([A-Za-z0-9_.:]+)").unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionParser;

impl FunctionParser {
    pub(crate) fn collect(&self, content: &str, symbols: &mut SymbolMap) {
        for line in lines(content) {
            let Some(name) = FUNCTION_REGEX
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str())
            else {
                continue;
            };
            let name = name.split(':').next().unwrap_or_default();
            add_dotted(symbols, name);
        }
    }
}

impl DialectParser for FunctionParser {
    fn parse(&self, content: &str) -> SymbolMap {
        let mut symbols = SymbolMap::new();
        self.collect(content, &mut symbols);
        symbols
    }
}
