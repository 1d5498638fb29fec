//! Symbol data model shared by parsers, the registry and the emitters.
//!
//! A symbol is either a bare declared name (`Plain`) or a named aggregate
//! (`Structured`) whose members are themselves symbols. Plain members are
//! the table's fields; structured members are nested tables such as the
//! children of `Enum`.

use std::collections::BTreeMap;

/// Ordered map from symbol name to symbol.
///
/// `BTreeMap<String, _>` iterates in ordinal byte order, which is the order
/// every emitter needs, so sorting never has to happen at render time.
pub type SymbolMap = BTreeMap<String, Symbol>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Symbol {
    /// A bare declared name with no further structure.
    #[default]
    Plain,
    /// A table/namespace exposing named members.
    Structured(SymbolMap),
}

impl Symbol {
    /// An empty table.
    pub fn table() -> Self {
        Symbol::Structured(SymbolMap::new())
    }

    /// A table whose members are all plain fields.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Symbol::Structured(
            fields
                .into_iter()
                .map(|field| (field.into(), Symbol::Plain))
                .collect(),
        )
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Symbol::Structured(_))
    }

    pub fn members(&self) -> Option<&SymbolMap> {
        match self {
            Symbol::Plain => None,
            Symbol::Structured(members) => Some(members),
        }
    }

    /// Names of the members, in ordinal order. Empty for plain symbols.
    pub fn field_names(&self) -> Vec<&str> {
        self.members()
            .map(|members| members.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Promote to a table (keeping existing members) and return its members.
    pub fn as_table_mut(&mut self) -> &mut SymbolMap {
        match self {
            Symbol::Structured(members) => members,
            Symbol::Plain => {
                *self = Symbol::table();
                self.as_table_mut()
            }
        }
    }
}

/// Record `name` as declared. An existing entry (plain or structured) wins.
pub fn add_plain(map: &mut SymbolMap, name: &str) {
    if !map.contains_key(name) {
        map.insert(name.to_string(), Symbol::Plain);
    }
}

/// Record `name` as a table and return its members.
///
/// A previous plain entry is promoted; existing members are kept.
pub fn add_table<'a>(map: &'a mut SymbolMap, name: &str) -> &'a mut SymbolMap {
    map.entry(name.to_string()).or_default().as_table_mut()
}

/// Record `field` as a member of the table `table`.
pub fn add_field(map: &mut SymbolMap, table: &str, field: &str) {
    add_plain(add_table(map, table), field);
}

/// Whether `name` is a usable symbol name: non-empty, ASCII letters, digits
/// and underscores only. A leading digit is allowed.
pub fn is_symbol_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Whether `name` can be written as a bare Lua table key.
pub fn is_lua_identifier(name: &str) -> bool {
    is_symbol_name(name) && !name.as_bytes()[0].is_ascii_digit()
}
