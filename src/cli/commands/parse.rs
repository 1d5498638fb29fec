use std::{fs, io};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::args::ParseCommand;
use super::super::exit_status::ExitStatus;
use super::super::report::print_names_to;
use crate::config::GlobalsStyle;
use crate::core::{Registry, Symbol, SymbolMap, parse as parse_dialect};
use crate::emit::json::render_json;

pub fn parse(cmd: ParseCommand) -> Result<ExitStatus> {
    let content = fs::read_to_string(&cmd.file)
        .with_context(|| format!("Failed to read file: {}", cmd.file.display()))?;
    let symbols = parse_dialect(cmd.dialect, &content);

    if symbols.is_empty() {
        eprintln!(
            "{} no globals matched in {} as {}",
            "warning:".bold().yellow(),
            cmd.file.display(),
            cmd.dialect
        );
        return Ok(ExitStatus::Failure);
    }

    if cmd.json {
        print!("{}", render_json(&Registry::from(symbols), GlobalsStyle::Structured)?);
    } else {
        print_names_to(symbol_paths(&symbols), &mut io::stdout().lock());
    }
    Ok(ExitStatus::Success)
}

/// Every name with its members as dotted paths, depth first.
fn symbol_paths(symbols: &SymbolMap) -> Vec<String> {
    let mut paths = Vec::new();
    collect_paths(symbols, "", &mut paths);
    paths
}

fn collect_paths(symbols: &SymbolMap, prefix: &str, paths: &mut Vec<String>) {
    for (name, symbol) in symbols {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}.{}", prefix, name)
        };
        if let Symbol::Structured(members) = symbol {
            paths.push(path.clone());
            collect_paths(members, &path, paths);
        } else {
            paths.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::symbol::{add_field, add_plain, add_table};

    #[test]
    fn test_symbol_paths() {
        let mut symbols = SymbolMap::new();
        add_plain(&mut symbols, "OKAY");
        add_field(&mut symbols, "C_Map", "GetMapInfo");
        let members = add_table(&mut symbols, "Enum");
        add_field(members, "ItemQuality", "Poor");

        assert_eq!(
            symbol_paths(&symbols),
            vec![
                "C_Map",
                "C_Map.GetMapInfo",
                "Enum",
                "Enum.ItemQuality",
                "Enum.ItemQuality.Poor",
                "OKAY",
            ]
        );
    }
}
