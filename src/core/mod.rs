//! Core extraction engine.
//!
//! - `symbol`: the symbol data model
//! - `parsers`: one parsing strategy per source dialect
//! - `registry`: merging symbol maps into the run's registry
//! - `custom`: user-supplied globals
//! - `snapshot`: previous-run names and the diff against them
//!
//! Nothing in here touches the network; only `custom` and `snapshot` touch
//! the filesystem.

pub mod custom;
pub mod parsers;
pub mod registry;
pub mod snapshot;
pub mod symbol;

pub use parsers::{Dialect, DialectParser, parse};
pub use registry::{Registry, merge};
pub use snapshot::{Snapshot, SnapshotDiff, diff};
pub use symbol::{Symbol, SymbolMap};
