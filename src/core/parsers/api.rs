//! API dump dialect.
//!
//! API dumps mix three conventions in one file: `function Name()` stubs,
//! `C_Namespace = { fields = { ... } }` tables, and flat string lists held
//! in `local GlobalAPI = { ... }` / `local LuaAPI = { ... }`. Entries of the
//! string lists may be dotted (`"C_Map.GetMapInfo"`).

use std::sync::LazyLock;

use regex::Regex;

use super::string_table::add_dotted;
use super::{DialectParser, FunctionParser, TableFieldsParser, brace_delta, lines, quoted_literals};
use crate::core::symbol::SymbolMap;

static API_LIST_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*local\s+(?:GlobalAPI|LuaAPI)\s*=\s*\{").unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct ApiParser;

impl DialectParser for ApiParser {
    fn parse(&self, content: &str) -> SymbolMap {
        let mut symbols = SymbolMap::new();
        FunctionParser.collect(content, &mut symbols);
        TableFieldsParser.collect(content, &mut symbols);
        collect_api_lists(content, &mut symbols);
        symbols
    }
}

/// Quoted entries of the `GlobalAPI`/`LuaAPI` lists, up to the brace that
/// closes the list.
fn collect_api_lists(content: &str, symbols: &mut SymbolMap) {
    // Depth relative to the list opener; `None` while outside a list.
    let mut list_depth: Option<i32> = None;

    for line in lines(content) {
        let text = match list_depth {
            Some(_) => line,
            None => match API_LIST_OPEN_REGEX.find(line) {
                Some(m) => {
                    list_depth = Some(0);
                    &line[m.end() - 1..]
                }
                None => continue,
            },
        };

        for literal in quoted_literals(text) {
            add_dotted(symbols, literal);
        }

        if let Some(depth) = list_depth.as_mut() {
            *depth += brace_delta(text);
            if *depth <= 0 {
                list_depth = None;
            }
        }
    }
}
