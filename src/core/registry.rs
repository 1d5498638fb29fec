//! The merged, deduplicated collection of every symbol discovered in a run.
//!
//! Conflict rules when the same name arrives twice:
//!
//! - both plain: no-op
//! - either structured: the result is structured and the member sets are
//!   unioned (a plain side contributes no members)
//! - nested structured members merge recursively with the same rules
//!
//! The rules only ever add information, so folding sources in any order
//! produces the same registry.

use std::collections::BTreeSet;

use super::symbol::{Symbol, SymbolMap};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    symbols: SymbolMap,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a source's symbols into the registry.
    pub fn absorb(&mut self, incoming: SymbolMap) {
        merge_maps(&mut self.symbols, incoming);
    }

    pub fn symbols(&self) -> &SymbolMap {
        &self.symbols
    }

    /// Top-level names, the unit tracked by snapshots.
    pub fn names(&self) -> BTreeSet<String> {
        self.symbols.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of top-level entries that carry members.
    pub fn structured_count(&self) -> usize {
        self.symbols.values().filter(|s| s.is_structured()).count()
    }

    pub fn has_structured(&self) -> bool {
        self.symbols.values().any(Symbol::is_structured)
    }
}

impl From<SymbolMap> for Registry {
    fn from(symbols: SymbolMap) -> Self {
        Self { symbols }
    }
}

/// Merge `incoming` into `target` and return the result.
pub fn merge(mut target: Registry, incoming: SymbolMap) -> Registry {
    target.absorb(incoming);
    target
}

/// Merge every entry of `incoming` into `target`.
pub fn merge_maps(target: &mut SymbolMap, incoming: SymbolMap) {
    for (name, symbol) in incoming {
        match target.get_mut(&name) {
            Some(existing) => merge_symbol(existing, symbol),
            None => {
                target.insert(name, symbol);
            }
        }
    }
}

/// Merge two entries for the same name. Structured always dominates plain.
pub fn merge_symbol(target: &mut Symbol, incoming: Symbol) {
    let Symbol::Structured(incoming) = incoming else {
        return;
    };
    match target {
        Symbol::Plain => *target = Symbol::Structured(incoming),
        Symbol::Structured(members) => merge_maps(members, incoming),
    }
}
