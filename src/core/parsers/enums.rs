//! Enum and constant dialect.
//!
//! ```lua
//! LE_PARTY_CATEGORY_HOME = 1
//! NUM_LE_BAG_FILTER_FLAGS = 5
//!
//! Enum = {
//!     ItemQuality = {
//!         Poor = 0,
//!         Common = 1,
//!     },
//! }
//! ```
//!
//! Top-level `LE_*` constants are plain names. `Enum` and `Constants` open a
//! scope whose direct child tables become structured members, each with the
//! keys assigned inside it (or the literals of its `fields = { ... }` block)
//! as fields. Any other capitalized top-level table is recorded as a table
//! with no known fields.

use std::sync::LazyLock;

use regex::Regex;

use super::{
    DialectParser, FIELDS_OPEN_REGEX, TABLE_OPEN_REGEX, brace_delta, lines, quoted_literals,
};
use crate::core::symbol::{SymbolMap, add_plain, add_table, is_symbol_name};

static CONSTANT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*((?:NUM_)?LE_[A-Z0-9_]+)\s*=").unwrap());

static MEMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*=(?:[^=]|$)").unwrap());

static INLINE_MEMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*=(?:[^=]|$)").unwrap());

/// Top-level tables whose children are tracked.
const SCOPE_TABLES: &[&str] = &["Enum", "Constants"];

const PARENT_BODY_DEPTH: i32 = 1;
const CHILD_BODY_DEPTH: i32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
enum EnumState {
    Outside,
    InParent {
        parent: String,
    },
    InChild {
        parent: String,
        child: String,
    },
    InChildFields {
        parent: String,
        child: String,
        start_depth: i32,
    },
}

#[derive(Debug)]
struct EnumTracker {
    state: EnumState,
    depth: i32,
}

impl EnumTracker {
    fn new() -> Self {
        Self {
            state: EnumState::Outside,
            depth: 0,
        }
    }

    fn feed(&mut self, line: &str, symbols: &mut SymbolMap) {
        if self.state == EnumState::Outside && self.depth < 0 {
            self.depth = 0;
        }
        let depth = self.depth;

        let state = match std::mem::replace(&mut self.state, EnumState::Outside) {
            EnumState::Outside if depth == 0 => open_top_level(line, symbols),
            EnumState::Outside => EnumState::Outside,
            EnumState::InParent { parent } if depth == PARENT_BODY_DEPTH => {
                parent_line(parent, line, symbols)
            }
            EnumState::InChild { parent, child } if depth == CHILD_BODY_DEPTH => {
                child_line(parent, child, line, 0, symbols)
            }
            EnumState::InChildFields {
                parent,
                child,
                start_depth,
            } => {
                collect_literals(symbols, &parent, &child, line);
                EnumState::InChildFields {
                    parent,
                    child,
                    start_depth,
                }
            }
            // Deeper lines inside a scope carry nothing of interest.
            other => other,
        };

        self.depth = depth + brace_delta(line);
        self.state = settle(state, self.depth);
    }
}

fn open_top_level(line: &str, symbols: &mut SymbolMap) -> EnumState {
    if let Some(caps) = CONSTANT_REGEX.captures(line) {
        add_plain(symbols, &caps[1]);
        return EnumState::Outside;
    }
    let Some(caps) = TABLE_OPEN_REGEX.captures(line) else {
        return EnumState::Outside;
    };
    let name = &caps[1];
    add_table(symbols, name);
    if SCOPE_TABLES.contains(&name) {
        EnumState::InParent {
            parent: name.to_string(),
        }
    } else {
        EnumState::Outside
    }
}

/// A line directly inside `Enum`/`Constants`.
fn parent_line(parent: String, line: &str, symbols: &mut SymbolMap) -> EnumState {
    if let Some(caps) = TABLE_OPEN_REGEX.captures(line) {
        let child = caps[1].to_string();
        add_table(add_table(symbols, &parent), &child);
        let body_start = caps.get(0).map_or(line.len(), |m| m.end());
        return child_line(parent, child, line, body_start, symbols);
    }
    if let Some(caps) = MEMBER_REGEX.captures(line) {
        add_plain(add_table(symbols, &parent), &caps[1]);
    }
    EnumState::InParent { parent }
}

/// A line (or the rest of the opener line, from `from`) in a child body.
fn child_line(
    parent: String,
    child: String,
    line: &str,
    from: usize,
    symbols: &mut SymbolMap,
) -> EnumState {
    let body = &line[from..];
    if let Some(m) = FIELDS_OPEN_REGEX.find(body) {
        let start_depth = if from == 0 {
            CHILD_BODY_DEPTH + brace_delta(&body[..m.start()])
        } else {
            PARENT_BODY_DEPTH + brace_delta(&line[..from + m.start()])
        };
        collect_literals(symbols, &parent, &child, &body[m.end()..]);
        return EnumState::InChildFields {
            parent,
            child,
            start_depth,
        };
    }

    if from == 0 {
        if let Some(caps) = MEMBER_REGEX.captures(line) {
            add_member(symbols, &parent, &child, &caps[1]);
        }
    } else {
        for caps in INLINE_MEMBER_REGEX.captures_iter(body) {
            add_member(symbols, &parent, &child, &caps[1]);
        }
    }
    EnumState::InChild { parent, child }
}

fn settle(state: EnumState, depth: i32) -> EnumState {
    let state = match state {
        EnumState::InChildFields {
            parent,
            child,
            start_depth,
        } if depth <= start_depth => EnumState::InChild { parent, child },
        other => other,
    };
    let state = match state {
        EnumState::InChild { parent, .. } if depth <= PARENT_BODY_DEPTH => {
            EnumState::InParent { parent }
        }
        other => other,
    };
    match state {
        EnumState::InParent { .. } if depth <= 0 => EnumState::Outside,
        other => other,
    }
}

fn add_member(symbols: &mut SymbolMap, parent: &str, child: &str, field: &str) {
    if is_symbol_name(field) {
        add_plain(add_table(add_table(symbols, parent), child), field);
    }
}

fn collect_literals(symbols: &mut SymbolMap, parent: &str, child: &str, text: &str) {
    for literal in quoted_literals(text) {
        add_member(symbols, parent, child, literal);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnumParser;

impl DialectParser for EnumParser {
    fn parse(&self, content: &str) -> SymbolMap {
        let mut symbols = SymbolMap::new();
        let mut tracker = EnumTracker::new();
        for line in lines(content) {
            tracker.feed(line, &mut symbols);
        }
        symbols
    }
}
