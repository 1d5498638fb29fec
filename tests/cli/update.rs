use anyhow::Result;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const CONFIG: &str = r#"{
    "sources": [
        { "name": "Strings", "url": "sources/strings.lua", "dialect": "assignment" },
        { "name": "Events", "url": "sources/events.lua", "dialect": "string-table" },
        { "name": "Api", "url": "sources/api.lua", "dialect": "table-fields" }
    ],
    "changelog": "CHANGELOG.md"
}"#;

const STRINGS: &str = "OKAY = \"Okay\";\nCANCEL = \"Cancel\";\n";
const EVENTS: &str = "local Events = {\n\t\"ADDON_LOADED\",\n\t\"PLAYER_LOGIN\",\n}\n";
const API: &str = "C_Map = {\n\tfields = {\n\t\t\"GetBestMapForUnit\",\n\t\t\"GetMapInfo\",\n\t},\n}\n";

fn setup() -> Result<CliTest> {
    let test = CliTest::with_file(".wowglobalsrc.json", CONFIG)?;
    test.write_file("sources/strings.lua", STRINGS)?;
    test.write_file("sources/events.lua", EVENTS)?;
    test.write_file("sources/api.lua", API)?;
    Ok(test)
}

#[test]
fn test_update_writes_outputs() -> Result<()> {
    let test = setup()?;

    let output = test.update_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("  ✓ Strings (assignment): 2 globals\n"));
    assert!(out.contains("  ✓ Api (table-fields): 1 global\n"));
    assert!(out.contains("✓ 5 globals (1 table), +5 / -0 since last run\n"));
    assert!(out.contains("Updated .luacheckrc\n"));
    assert!(out.contains("Updated wow_globals.lua\n"));
    assert!(out.contains("Updated wow_globals.json\n"));

    let rc = test.read_file(".luacheckrc")?;
    assert!(rc.starts_with("std = 'lua51'\n"));
    assert!(rc.contains(
        "globals = {\n    \"ADDON_LOADED\",\n    \"CANCEL\",\n    C_Map = {\n        fields = {\n            \"GetBestMapForUnit\",\n            \"GetMapInfo\",\n        },\n    },\n    \"OKAY\",\n    \"PLAYER_LOGIN\",\n}\n"
    ));

    let list = test.read_file("wow_globals.lua")?;
    assert!(list.contains("globals = {\n    \"ADDON_LOADED\",\n"));

    let json: Value = serde_json::from_str(&test.read_file("wow_globals.json")?)?;
    assert_eq!(json["C_Map"]["fields"][1], "GetMapInfo");
    assert_eq!(json["OKAY"], serde_json::json!({}));

    let snapshot: Vec<String> =
        serde_json::from_str(&test.read_file(".cache/globals_snapshot.json")?)?;
    assert_eq!(snapshot.len(), 5);

    let changelog = test.read_file("CHANGELOG.md")?;
    assert!(changelog.ends_with(": +5 / -0 globals (5 total)\n"));
    assert!(test.root().join("custom_globals.txt").exists());

    Ok(())
}

#[test]
fn test_second_update_is_noop() -> Result<()> {
    let test = setup()?;
    test.update_command().output()?;
    let first = test.read_file(".luacheckrc")?;

    let output = test.update_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("+0 / -0 since last run"));
    assert!(out.contains("Outputs are up to date\n"));
    assert_eq!(test.read_file(".luacheckrc")?, first);
    assert_eq!(test.read_file("CHANGELOG.md")?.lines().count(), 1);

    Ok(())
}

#[test]
fn test_update_preserves_luacheckrc_preamble() -> Result<()> {
    let test = setup()?;
    test.write_file(
        ".luacheckrc",
        "std = 'lua51+wow'\n\nglobals = {\n    \"STALE\",\n}\n\nfiles['spec/'] = { std = '+busted' }\n",
    )?;

    let output = test.update_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    let rc = test.read_file(".luacheckrc")?;
    assert!(rc.starts_with("std = 'lua51+wow'\n\nglobals = {\n    \"ADDON_LOADED\",\n"));
    assert!(rc.ends_with("    \"PLAYER_LOGIN\",\n}\n\nfiles['spec/'] = { std = '+busted' }\n"));
    assert!(!rc.contains("STALE"));

    Ok(())
}

#[test]
fn test_custom_globals_are_included() -> Result<()> {
    let test = setup()?;
    test.write_file("custom_globals.txt", "# addon globals\nMyAddonDB\nC_Map.MyHook\n")?;

    let output = test.update_command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("  ✓ custom: 2 globals\n"));
    let rc = test.read_file(".luacheckrc")?;
    assert!(rc.contains("    \"MyAddonDB\",\n"));
    assert!(rc.contains("            \"MyHook\",\n"));

    Ok(())
}

#[test]
fn test_failed_source_exits_with_failure() -> Result<()> {
    let test = setup()?;
    std::fs::remove_file(test.root().join("sources/events.lua"))?;

    let output = test.update_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("  ✘ Events (string-table): Failed to read source file"));
    assert!(out.contains("warning: 1 source could not be fetched"));
    assert!(out.contains("✓ 3 globals (1 table)"));
    assert!(test.root().join(".luacheckrc").exists());

    Ok(())
}

#[test]
fn test_empty_source_only_warns() -> Result<()> {
    let test = setup()?;
    test.write_file("sources/events.lua", "-- no events in this build\n")?;

    let output = test.update_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("  ✘ Events (string-table): no globals matched\n"));
    assert!(out.contains("warning: 1 source matched no globals\n"));
    assert!(out.contains("✓ 3 globals (1 table)"));

    Ok(())
}

#[test]
fn test_api_index_page_source() -> Result<()> {
    let test = CliTest::with_file(
        ".wowglobalsrc.json",
        r#"{ "sources": [{ "name": "Wiki", "url": "sources/api.html", "dialect": "wiki-api-links" }] }"#,
    )?;
    test.write_file(
        "sources/api.html",
        r#"<li><a href="/wiki/API_CreateFrame">CreateFrame</a></li><li><a href="/wiki/API_C_Map.GetMapInfo">C_Map.GetMapInfo</a></li>"#,
    )?;

    let output = test.update_command().output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("  ✓ Wiki (wiki-api-links): 2 globals\n"));
    let rc = test.read_file(".luacheckrc")?;
    assert!(rc.contains("    C_Map = {\n        fields = {\n            \"GetMapInfo\",\n"));
    assert!(rc.contains("    \"CreateFrame\",\n"));

    Ok(())
}

#[test]
fn test_nothing_extracted_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".wowglobalsrc.json", CONFIG)?;

    let output = test.update_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: No globals extracted"));
    assert!(!test.root().join(".luacheckrc").exists());
    assert!(!test.root().join("wow_globals.lua").exists());
    assert!(!test.root().join("wow_globals.json").exists());
    assert!(!test.root().join(".cache/globals_snapshot.json").exists());

    Ok(())
}

#[test]
fn test_dry_run_reports_pending_changes() -> Result<()> {
    let test = setup()?;

    let output = test.update_command().arg("--dry-run").output()?;

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("Would update .luacheckrc\n"));
    assert!(!out.contains("Changelog:"));
    assert!(!test.root().join(".luacheckrc").exists());
    assert!(!test.root().join("custom_globals.txt").exists());
    assert!(!test.root().join(".cache").exists());

    test.update_command().output()?;
    let output = test.update_command().arg("--dry-run").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Outputs are up to date\n"));

    Ok(())
}

#[test]
fn test_explicit_config_path() -> Result<()> {
    let test = CliTest::with_file(
        "tools/globals.json",
        r#"{
            "sources": [{ "name": "Strings", "url": "strings.lua", "dialect": "assignment" }],
            "style": "flat",
            "luacheckrc": "../.luacheckrc"
        }"#,
    )?;
    test.write_file("tools/strings.lua", STRINGS)?;

    let output = test
        .update_command()
        .args(["--config", "tools/globals.json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(test.root().join(".luacheckrc").exists());
    assert_eq!(
        test.read_file("tools/wow_globals.json")?,
        "[\n  \"CANCEL\",\n  \"OKAY\"\n]\n"
    );

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".wowglobalsrc.json", r#"{ "sources": [] }"#)?;

    let output = test.update_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("'sources' must list at least one source"));

    Ok(())
}
