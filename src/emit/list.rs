//! Flat globals list, a Lua file naming every top-level global.

use std::fmt::Write;
#[cfg(test)]
use std::{collections::BTreeSet, sync::LazyLock};

#[cfg(test)]
use regex::Regex;

use crate::core::Registry;

pub const LIST_HEADER: &str = "-- Auto-generated by wow-globals. Do not edit.";

#[cfg(test)]
static LIST_ENTRY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^\s*"((?:[^"\\]|\\.)*)",?\s*$"#).unwrap());

pub fn render_list(registry: &Registry) -> String {
    let mut out = format!("{}\nglobals = {{\n", LIST_HEADER);
    for name in registry.symbols().keys() {
        let _ = writeln!(out, "    \"{}\",", name.replace('\\', "\\\\").replace('"', "\\\""));
    }
    out.push_str("}\n");
    out
}

/// Names listed in a file produced by [`render_list`].
#[cfg(test)]
pub(crate) fn parse_list_names(content: &str) -> BTreeSet<String> {
    content
        .lines()
        .filter_map(|line| LIST_ENTRY_REGEX.captures(line))
        .map(|caps| caps[1].replace("\\\"", "\"").replace("\\\\", "\\"))
        .collect()
}
