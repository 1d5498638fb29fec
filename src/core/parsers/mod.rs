//! Dialect parsers.
//!
//! Every resource file uses one of a handful of textual conventions for
//! declaring names. Each convention gets its own strategy; a source picks
//! its strategy by [`Dialect`] name in the configuration.
//!
//! Parsers are total: malformed or unrecognized lines are skipped and a
//! file with nothing recognizable yields an empty map.

use std::sync::LazyLock;

use clap::ValueEnum;
use enum_dispatch::enum_dispatch;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::symbol::SymbolMap;

pub mod api;
pub mod assignment;
pub mod enums;
pub mod functions;
pub mod string_table;
pub mod table_fields;
pub mod wiki_links;
pub mod xml_names;

pub use api::ApiParser;
pub use assignment::AssignmentParser;
pub use enums::EnumParser;
pub use functions::FunctionParser;
pub use string_table::StringTableParser;
pub use table_fields::TableFieldsParser;
pub use wiki_links::WikiApiLinkParser;
pub use xml_names::XmlNameParser;

/// `Name = {` for a capitalized name at the start of a line.
pub(crate) static TABLE_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Z][A-Za-z0-9_]*)\s*=\s*\{").unwrap());

/// Opener of a `fields = { ... }` block anywhere on a line.
pub(crate) static FIELDS_OPEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfields\s*=\s*\{").unwrap());

static QUOTED_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)"|'([^']*)'"#).unwrap());

/// A parsing strategy for one dialect.
#[enum_dispatch]
pub trait DialectParser {
    /// Extract every declared symbol from `content`.
    fn parse(&self, content: &str) -> SymbolMap;
}

/// A concrete strategy, built from a [`Dialect`].
#[enum_dispatch(DialectParser)]
#[derive(Debug, Clone)]
pub enum Strategy {
    Assignment(AssignmentParser),
    StringTable(StringTableParser),
    Functions(FunctionParser),
    TableFields(TableFieldsParser),
    Enums(EnumParser),
    Api(ApiParser),
    XmlNames(XmlNameParser),
    WikiApiLinks(WikiApiLinkParser),
}

/// Named textual conventions, as written in the configuration file and on
/// the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// `NAME = value` with an uppercase name at column 0.
    Assignment,
    /// `Name = value`, `_G["Name"] = value` and `_G.Name = value`.
    AssignmentRelaxed,
    /// A table of `"Name",` lines.
    StringTable,
    /// A table of `"Table.field",` lines.
    DottedStringTable,
    /// `function Name(...)` definitions.
    Functions,
    /// `Name = { fields = { "a", "b" } }` tables.
    TableFields,
    /// `LE_*` constants and the `Enum`/`Constants` tables.
    Enums,
    /// Functions, field tables and the `GlobalAPI`/`LuaAPI` string lists.
    Api,
    /// `name="..."` attributes of UI markup.
    XmlNames,
    /// `<a href="/wiki/API_...">` links of an API index page.
    WikiApiLinks,
}

impl Dialect {
    pub fn all() -> &'static [Dialect] {
        &[
            Dialect::Assignment,
            Dialect::AssignmentRelaxed,
            Dialect::StringTable,
            Dialect::DottedStringTable,
            Dialect::Functions,
            Dialect::TableFields,
            Dialect::Enums,
            Dialect::Api,
            Dialect::XmlNames,
            Dialect::WikiApiLinks,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::Assignment => "assignment",
            Dialect::AssignmentRelaxed => "assignment-relaxed",
            Dialect::StringTable => "string-table",
            Dialect::DottedStringTable => "dotted-string-table",
            Dialect::Functions => "functions",
            Dialect::TableFields => "table-fields",
            Dialect::Enums => "enums",
            Dialect::Api => "api",
            Dialect::XmlNames => "xml-names",
            Dialect::WikiApiLinks => "wiki-api-links",
        }
    }

    /// File extension read from a local directory source.
    pub fn file_extension(&self) -> &'static str {
        match self {
            Dialect::XmlNames => "xml",
            Dialect::WikiApiLinks => "html",
            _ => "lua",
        }
    }

    pub fn strategy(self) -> Strategy {
        match self {
            Dialect::Assignment => AssignmentParser::strict().into(),
            Dialect::AssignmentRelaxed => AssignmentParser::relaxed().into(),
            Dialect::StringTable => StringTableParser::plain().into(),
            Dialect::DottedStringTable => StringTableParser::dotted().into(),
            Dialect::Functions => FunctionParser.into(),
            Dialect::TableFields => TableFieldsParser.into(),
            Dialect::Enums => EnumParser.into(),
            Dialect::Api => ApiParser.into(),
            Dialect::XmlNames => XmlNameParser.into(),
            Dialect::WikiApiLinks => WikiApiLinkParser.into(),
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse `content` with the strategy registered for `dialect`.
pub fn parse(dialect: Dialect, content: &str) -> SymbolMap {
    dialect.strategy().parse(content)
}

/// Split on `\n`, `\r\n` and bare `\r`.
///
/// `\r\n` produces an extra empty line, which no parser treats as
/// significant.
pub(crate) fn lines(content: &str) -> impl Iterator<Item = &str> {
    content.split(['\n', '\r'])
}

/// Net brace nesting change of a line.
pub(crate) fn brace_delta(text: &str) -> i32 {
    text.chars().fold(0, |depth, c| match c {
        '{' => depth + 1,
        '}' => depth - 1,
        _ => depth,
    })
}

/// Contents of every single- or double-quoted literal in `text`.
pub(crate) fn quoted_literals(text: &str) -> impl Iterator<Item = &str> {
    QUOTED_LITERAL_REGEX.captures_iter(text).filter_map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().trim())
    })
}
