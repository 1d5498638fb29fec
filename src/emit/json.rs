//! JSON export of the registry.
//!
//! A registry without tables (or the flat style) is a sorted array of names.
//! Otherwise every top-level name maps to `{}` or `{"fields": [...]}`, where
//! a fields array holds strings for plain members and `{"CHILD": {"fields":
//! [...]}}` for nested tables.

#[cfg(test)]
use std::collections::BTreeSet;

#[cfg(test)]
use anyhow::bail;
use anyhow::{Context, Result};
use serde_json::{Map, Value, json};

use crate::config::GlobalsStyle;
use crate::core::symbol::{Symbol, SymbolMap};
use crate::core::Registry;

pub fn render_json(registry: &Registry, style: GlobalsStyle) -> Result<String> {
    let value = to_value(registry, style);
    let content = serde_json::to_string_pretty(&value).context("Failed to serialize globals")?;
    Ok(format!("{}\n", content))
}

pub fn to_value(registry: &Registry, style: GlobalsStyle) -> Value {
    if style == GlobalsStyle::Flat || !registry.has_structured() {
        return Value::Array(
            registry
                .symbols()
                .keys()
                .map(|name| Value::String(name.clone()))
                .collect(),
        );
    }

    let mut object = Map::new();
    for (name, symbol) in registry.symbols() {
        let entry = match symbol {
            Symbol::Structured(members) if !members.is_empty() => table_value(members),
            _ => Value::Object(Map::new()),
        };
        object.insert(name.clone(), entry);
    }
    Value::Object(object)
}

fn table_value(members: &SymbolMap) -> Value {
    let fields: Vec<Value> = members
        .iter()
        .map(|(name, symbol)| match symbol {
            Symbol::Structured(nested) if !nested.is_empty() => {
                let mut child = Map::new();
                child.insert(name.clone(), table_value(nested));
                Value::Object(child)
            }
            _ => Value::String(name.clone()),
        })
        .collect();
    json!({ "fields": fields })
}

/// Top-level names of a document produced by [`render_json`].
#[cfg(test)]
pub(crate) fn top_level_names(content: &str) -> Result<BTreeSet<String>> {
    let value: Value = serde_json::from_str(content).context("Failed to parse globals JSON")?;
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(name) => Ok(name),
                other => bail!("Expected a string, found {}", other),
            })
            .collect(),
        Value::Object(object) => Ok(object.into_iter().map(|(name, _)| name).collect()),
        other => bail!("Expected an array or object, found {}", other),
    }
}
