use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ Created .wowglobalsrc.json\n");
    assert!(test.root().join(".wowglobalsrc.json").exists());

    let content = test.read_file(".wowglobalsrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    let sources = parsed["sources"]
        .as_array()
        .context("Config should have a 'sources' array")?;
    assert_eq!(sources.len(), 6);
    assert_eq!(sources[0]["dialect"], "assignment");
    assert_eq!(parsed["luacheckrc"], ".luacheckrc");
    assert_eq!(parsed["style"], "structured");
    assert!(parsed["changelog"].is_null());

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".wowglobalsrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".wowglobalsrc.json already exists"));
    assert_eq!(test.read_file(".wowglobalsrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("update"));

    Ok(())
}
