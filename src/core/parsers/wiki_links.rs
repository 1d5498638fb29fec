//! API index page dialect: anchors pointing at `/wiki/API_...` pages.
//!
//! The link text names the function (`CreateFrame`,
//! `C_Map.GetMapInfo`); the href target is used when the text is empty.
//! Anything after the leading identifier (argument lists, annotations) is
//! ignored and method names (`Frame:Show`) declare only the object.

use std::sync::LazyLock;

use regex::Regex;

use super::DialectParser;
use super::string_table::add_dotted;
use crate::core::symbol::SymbolMap;

static API_LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*["']/wiki/API_([^"'#?]*)["'][^>]*>(.*?)</a>"#)
        .unwrap()
});

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

#[derive(Debug, Clone, Copy, Default)]
pub struct WikiApiLinkParser;

impl DialectParser for WikiApiLinkParser {
    fn parse(&self, content: &str) -> SymbolMap {
        let mut symbols = SymbolMap::new();
        for caps in API_LINK_REGEX.captures_iter(content) {
            let text = TAG_REGEX.replace_all(&caps[2], "");
            let name = match leading_name(&text) {
                "" => leading_name(&caps[1]),
                name => name,
            };
            let name = name.split(':').next().unwrap_or_default();
            add_dotted(&mut symbols, name);
        }
        symbols
    }
}

fn leading_name(text: &str) -> &str {
    let text = text.trim();
    let end = text
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == ':'))
        .unwrap_or(text.len());
    &text[..end]
}
