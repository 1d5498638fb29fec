//! Brace-tracked table dialect.
//!
//! ```lua
//! C_Map = {
//!     fields = {
//!         "GetBestMapForUnit",
//!         "GetMapInfo",
//!     },
//!     Documentation = { "unrelated", "strings" },
//! }
//! ```
//!
//! A line regex cannot tell a table's own `fields` from strings of nested
//! unrelated tables, so the parser walks line by line with a brace depth
//! counter and a small state machine:
//!
//! ```text
//! Outside --`Name = {` at depth 0--> InTable --`fields = {` at depth 1--> InFields
//!    ^                                 |   ^                                 |
//!    +-------- depth back to 0 --------+   +--- depth back to start depth ---+
//! ```
//!
//! The depth counter is updated after a line has been inspected, by the
//! number of `{` minus the number of `}` on that line.

use super::{
    DialectParser, FIELDS_OPEN_REGEX, TABLE_OPEN_REGEX, brace_delta, lines, quoted_literals,
};
use crate::core::symbol::{SymbolMap, add_field, add_table, is_symbol_name};

/// Depth of a table's own body.
const TABLE_BODY_DEPTH: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
enum TableState {
    Outside,
    InTable { name: String },
    InFields { name: String, start_depth: i32 },
}

#[derive(Debug)]
struct TableTracker {
    state: TableState,
    depth: i32,
}

impl TableTracker {
    fn new() -> Self {
        Self {
            state: TableState::Outside,
            depth: 0,
        }
    }

    fn feed(&mut self, line: &str, symbols: &mut SymbolMap) {
        // Stray closing braces at the top level resync the counter.
        if self.state == TableState::Outside && self.depth < 0 {
            self.depth = 0;
        }
        let depth = self.depth;
        let state = match std::mem::replace(&mut self.state, TableState::Outside) {
            TableState::Outside => open_table(line, depth, symbols),
            TableState::InTable { name } => enter_fields(name, line, 0, depth, symbols),
            TableState::InFields { name, start_depth } => {
                collect_fields(symbols, &name, line);
                TableState::InFields { name, start_depth }
            }
        };

        self.depth = depth + brace_delta(line);
        self.state = settle(state, self.depth);
    }
}

/// `Outside` transition: a capitalized table declared at the top level.
fn open_table(line: &str, depth: i32, symbols: &mut SymbolMap) -> TableState {
    if depth != 0 {
        return TableState::Outside;
    }
    let Some(caps) = TABLE_OPEN_REGEX.captures(line) else {
        return TableState::Outside;
    };
    let name = caps[1].to_string();
    add_table(symbols, &name);

    // The opener may carry the whole table: `C_X = { fields = { "A" } }`.
    let body_start = caps.get(0).map_or(line.len(), |m| m.end());
    enter_fields(name, line, body_start, depth, symbols)
}

/// `InTable` transition: a `fields = {` opener directly in the table body.
fn enter_fields(
    name: String,
    line: &str,
    from: usize,
    depth: i32,
    symbols: &mut SymbolMap,
) -> TableState {
    let Some(m) = FIELDS_OPEN_REGEX.find(&line[from..]) else {
        return TableState::InTable { name };
    };
    let opener = from + m.start();
    let start_depth = depth + brace_delta(&line[..opener]);
    if start_depth != TABLE_BODY_DEPTH {
        return TableState::InTable { name };
    }

    collect_fields(symbols, &name, &line[from + m.end()..]);
    TableState::InFields { name, start_depth }
}

/// Depth-driven exits, applied once the line's braces are counted.
fn settle(state: TableState, depth: i32) -> TableState {
    let state = match state {
        TableState::InFields { name, start_depth } if depth <= start_depth => {
            TableState::InTable { name }
        }
        other => other,
    };
    match state {
        TableState::InTable { .. } if depth <= 0 => TableState::Outside,
        other => other,
    }
}

fn collect_fields(symbols: &mut SymbolMap, table: &str, text: &str) {
    for literal in quoted_literals(text) {
        if is_symbol_name(literal) {
            add_field(symbols, table, literal);
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TableFieldsParser;

impl TableFieldsParser {
    pub(crate) fn collect(&self, content: &str, symbols: &mut SymbolMap) {
        let mut tracker = TableTracker::new();
        for line in lines(content) {
            tracker.feed(line, symbols);
        }
    }
}

impl DialectParser for TableFieldsParser {
    fn parse(&self, content: &str) -> SymbolMap {
        let mut symbols = SymbolMap::new();
        self.collect(content, &mut symbols);
        symbols
    }
}
