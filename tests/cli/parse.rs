use anyhow::Result;

use crate::{CliTest, stderr, stdout};

const API: &str = r#"local GlobalAPI = {
	"CreateFrame",
	"C_Map.GetMapInfo",
}

C_Map = {
	fields = {
		"GetBestMapForUnit",
	},
}
"#;

#[test]
fn test_parse_prints_names() -> Result<()> {
    let test = CliTest::with_file("api.lua", API)?;

    let output = test.parse_command().args(["api", "api.lua"]).output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "C_Map\nC_Map.GetBestMapForUnit\nC_Map.GetMapInfo\nCreateFrame\n"
    );

    Ok(())
}

#[test]
fn test_parse_json() -> Result<()> {
    let test = CliTest::with_file("events.lua", "\"ADDON_LOADED\",\n\"PLAYER_LOGIN\",\n")?;

    let output = test
        .parse_command()
        .args(["string-table", "events.lua", "--json"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "[\n  \"ADDON_LOADED\",\n  \"PLAYER_LOGIN\"\n]\n");

    Ok(())
}

#[test]
fn test_parse_nothing_matched() -> Result<()> {
    let test = CliTest::with_file("notes.txt", "nothing to see here\n")?;

    let output = test.parse_command().args(["enums", "notes.txt"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("warning: no globals matched in notes.txt as enums"));

    Ok(())
}

#[test]
fn test_parse_missing_file() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.parse_command().args(["functions", "none.lua"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error: Failed to read file: none.lua"));

    Ok(())
}

#[test]
fn test_parse_unknown_dialect() -> Result<()> {
    let test = CliTest::with_file("a.lua", "A = 1\n")?;

    let output = test.parse_command().args(["yaml", "a.lua"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("invalid value 'yaml'"));

    Ok(())
}
