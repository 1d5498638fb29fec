//! wow-globals - keeps luacheck in sync with the WoW API
//!
//! Fetches the community resource dumps describing the globals of the World
//! of Warcraft UI environment, parses each one according to its dialect,
//! merges everything into one registry and writes the `globals` block of a
//! `.luacheckrc` plus a flat Lua list and a JSON export.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Symbol model, dialect parsers, merging, snapshots
//! - `emit`: Output rendering and change-aware writing
//! - `fetch`: Local and cached HTTP source retrieval
//! - `logging`: Diagnostic logging setup
//! - `pipeline`: The update run

pub mod cli;
pub mod config;
pub mod core;
pub mod emit;
pub mod fetch;
pub mod logging;
pub mod pipeline;
