//! `.luacheckrc` rendering.
//!
//! Only the `globals = { ... }` block is generated. Everything else in an
//! existing config (std, ignores, per-file overrides) is left untouched; a
//! missing config is created from [`DEFAULT_LUACHECKRC`].
//!
//! Tables are written in luacheck's field-definition form:
//!
//! ```lua
//! globals = {
//!     "CreateFrame",
//!     C_Map = {
//!         fields = {
//!             "GetMapInfo",
//!         },
//!     },
//! }
//! ```
//!
//! A table with no known fields is written as a plain name, because an empty
//! `fields` list would make luacheck reject every field access.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::GlobalsStyle;
use crate::core::symbol::{Symbol, SymbolMap, is_lua_identifier};
use crate::core::Registry;

const INDENT: &str = "    ";

const GLOBALS_PLACEHOLDER: &str = "{globals}";

/// Template for a new `.luacheckrc`; `{globals}` is replaced by the block.
pub const DEFAULT_LUACHECKRC: &str = r#"std = 'lua51'
max_line_length = false
exclude_files = {'**Libs/', '**libs/'}
ignore = {
    '11./SLASH_.*', -- Setting an undefined (Slash handler) global variable
    '11./BINDING_.*', -- Setting an undefined (Keybinding header) global variable
    '113/LE_.*', -- Accessing an undefined (Lua ENUM type) global variable
    '113/NUM_LE_.*', -- Accessing an undefined (Lua ENUM type) global variable
    '211', -- Unused local variable
    '211/L', -- Unused local variable "L"
    '211/CL', -- Unused local variable "CL"
    '212', -- Unused argument
    '213', -- Unused loop variable
    '214', -- Unused hint
    '311', -- Value assigned to a local variable is unused
    '314', -- Value of a field in a table literal is unused
    '42.', -- Shadowing a local variable, an argument, a loop variable.
    '43.', -- Shadowing an upvalue, an upvalue argument, an upvalue loop variable.
    '542', -- An empty if branch
    '581', -- Error-prone operator orders
    '582', -- Error-prone operator orders
}

{globals}
"#;

static GLOBALS_BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^globals\s*=\s*\{").unwrap());

/// Render the full lint config, preserving everything in `existing` except
/// its globals block.
pub fn render_luacheckrc(
    registry: &Registry,
    existing: Option<&str>,
    style: GlobalsStyle,
) -> String {
    let block = render_globals_block(registry, style);
    match existing {
        Some(existing) => splice_globals(existing, &block),
        None => DEFAULT_LUACHECKRC.replace(GLOBALS_PLACEHOLDER, &block),
    }
}

/// Render `globals = { ... }` (no trailing newline).
pub fn render_globals_block(registry: &Registry, style: GlobalsStyle) -> String {
    let mut out = String::from("globals = {\n");
    match style {
        GlobalsStyle::Structured => write_members(&mut out, registry.symbols(), 1),
        GlobalsStyle::Flat => {
            for name in registry.symbols().keys() {
                write_plain(&mut out, name, 1);
            }
        }
    }
    out.push('}');
    out
}

fn write_members(out: &mut String, members: &SymbolMap, depth: usize) {
    for (name, symbol) in members {
        match symbol {
            Symbol::Structured(fields) if !fields.is_empty() => {
                let indent = INDENT.repeat(depth);
                let _ = writeln!(out, "{}{} = {{", indent, table_key(name));
                let _ = writeln!(out, "{}{}fields = {{", indent, INDENT);
                write_members(out, fields, depth + 2);
                let _ = writeln!(out, "{}{}}},", indent, INDENT);
                let _ = writeln!(out, "{}}},", indent);
            }
            _ => write_plain(out, name, depth),
        }
    }
}

fn write_plain(out: &mut String, name: &str, depth: usize) {
    let _ = writeln!(out, "{}\"{}\",", INDENT.repeat(depth), escape(name));
}

fn table_key(name: &str) -> String {
    if is_lua_identifier(name) {
        name.to_string()
    } else {
        format!("[\"{}\"]", escape(name))
    }
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Replace the globals block of `existing` with `block`.
///
/// The block is found at the start of a line and runs to its matching
/// closing brace; text after it is kept. Without a block, one is appended.
pub fn splice_globals(existing: &str, block: &str) -> String {
    let Some(found) = GLOBALS_BLOCK_REGEX.find(existing) else {
        let head = existing.trim_end();
        return if head.is_empty() {
            format!("{}\n", block)
        } else {
            format!("{}\n\n{}\n", head, block)
        };
    };

    let before = existing[..found.start()].trim_end();
    let after = find_block_end(existing, found.end() - 1)
        .map(|end| &existing[end..])
        .unwrap_or_default();

    let mut out = String::with_capacity(existing.len() + block.len());
    if !before.is_empty() {
        out.push_str(before);
        out.push_str("\n\n");
    }
    out.push_str(block);
    if after.trim().is_empty() {
        out.push('\n');
    } else {
        out.push_str(after);
    }
    out
}

/// Byte offset just past the `}` matching the `{` at `open`.
///
/// Braces inside string literals and `--` comments are not counted.
/// Returns `None` if the block never closes.
fn find_block_end(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote && bytes[i] != b'\n' {
                    if bytes[i] == b'\\' {
                        i += 1;
                    }
                    i += 1;
                }
            }
            b'-' if bytes.get(i + 1) == Some(&b'-') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::{add_field, add_plain, add_table};
    use pretty_assertions::assert_eq;

    fn sample_registry() -> Registry {
        let mut symbols = SymbolMap::new();
        add_plain(&mut symbols, "OKAY");
        add_plain(&mut symbols, "CreateFrame");
        add_field(&mut symbols, "C_Map", "GetMapInfo");
        add_field(&mut symbols, "C_Map", "GetBestMapForUnit");
        add_table(&mut symbols, "C_Empty");
        let members = add_table(&mut symbols, "Enum");
        add_field(members, "ItemQuality", "Poor");
        add_plain(members, "Flat");
        add_plain(&mut symbols, "3DModel");
        Registry::from(symbols)
    }

    #[test]
    fn test_structured_block() {
        insta::assert_snapshot!(
            render_globals_block(&sample_registry(), GlobalsStyle::Structured),
            @r#"
globals = {
    "3DModel",
    "C_Empty",
    C_Map = {
        fields = {
            "GetBestMapForUnit",
            "GetMapInfo",
        },
    },
    "CreateFrame",
    Enum = {
        fields = {
            "Flat",
            ItemQuality = {
                fields = {
                    "Poor",
                },
            },
        },
    },
    "OKAY",
}
"#
        );
    }

    #[test]
    fn test_flat_block() {
        let block = render_globals_block(&sample_registry(), GlobalsStyle::Flat);
        assert_eq!(
            block,
            "globals = {\n    \"3DModel\",\n    \"C_Empty\",\n    \"C_Map\",\n    \"CreateFrame\",\n    \"Enum\",\n    \"OKAY\",\n}"
        );
    }

    #[test]
    fn test_non_identifier_table_key_and_escaping() {
        let mut symbols = SymbolMap::new();
        add_field(&mut symbols, "2D", "Draw");
        let block = render_globals_block(&Registry::from(symbols), GlobalsStyle::Structured);
        assert!(block.contains("    [\"2D\"] = {\n"));
        assert_eq!(escape("a\"b\\c"), "a\\\"b\\\\c");
    }

    #[test]
    fn test_new_config_uses_default_template() {
        let rendered =
            render_luacheckrc(&sample_registry(), None, GlobalsStyle::Structured);

        assert!(rendered.starts_with("std = 'lua51'\n"));
        assert!(rendered.contains("'113/NUM_LE_.*',"));
        assert!(rendered.contains("}\n\nglobals = {\n    \"3DModel\",\n"));
        assert!(rendered.ends_with("    \"OKAY\",\n}\n"));
        assert!(!rendered.contains(GLOBALS_PLACEHOLDER));
    }

    #[test]
    fn test_rerender_is_stable() {
        let registry = sample_registry();
        let first = render_luacheckrc(&registry, None, GlobalsStyle::Structured);
        let second = render_luacheckrc(&registry, Some(&first), GlobalsStyle::Structured);
        assert_eq!(first, second);
    }

    #[test]
    fn test_splice_replaces_block_and_keeps_surroundings() {
        let existing = r#"std = 'lua51'
-- globals = { "commented" }

globals = {
    "OLD_ONE",
    Old = { fields = { "x }", '{' } }, -- a } in a comment
}

files["tests/"] = { std = "+busted" }
"#;
        let spliced = splice_globals(existing, "globals = {\n    \"NEW\",\n}");
        assert_eq!(
            spliced,
            r#"std = 'lua51'
-- globals = { "commented" }

globals = {
    "NEW",
}

files["tests/"] = { std = "+busted" }
"#
        );
    }

    #[test]
    fn test_splice_appends_when_missing() {
        let spliced = splice_globals("std = 'lua51'\n\n\n", "globals = {\n}");
        assert_eq!(spliced, "std = 'lua51'\n\nglobals = {\n}\n");
        assert_eq!(splice_globals("", "globals = {\n}"), "globals = {\n}\n");
    }

    #[test]
    fn test_splice_unclosed_block_replaces_to_end() {
        let spliced = splice_globals("std = 'lua51'\nglobals = {\n  \"A\",\n", "globals = {\n}");
        assert_eq!(spliced, "std = 'lua51'\n\nglobals = {\n}\n");
    }

    #[test]
    fn test_find_block_end_skips_strings_and_comments() {
        let text = r#"{ "}", '}', -- }
 "esc\"}" }tail"#;
        let end = find_block_end(text, 0).unwrap();
        assert_eq!(&text[end..], "tail");
    }
}
