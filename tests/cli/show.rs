use anyhow::Result;
use serde_json::{Value, json};

use crate::CliTest;

#[test]
fn test_show_prints_canonical_manifest() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.show_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let app: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(app["id"], json!("com.example.zones"));
    assert_eq!(app["version"], json!("1.2.0"));
    assert_eq!(app["bugs"], json!({"url": "https://example.com/issues"}));
    assert_eq!(app["sdk"], json!(3));
    assert_eq!(app["flow"]["conditions"], json!([]));

    assert_eq!(
        app["flow"]["triggers"],
        json!([{
            "id": "TooCold",
            "title": {"en": "The temperature is too cold"},
            "tokens": [
                {"name": "zone", "type": "string", "title": {"en": "$common.zone"}, "example": {"en": "Kitchen"}},
                {"name": "temperature", "type": "number", "title": {"en": "temperature"}, "example": 14.5}
            ]
        }])
    );

    let action = &app["flow"]["actions"][0];
    assert_eq!(action["id"], json!("SetZoneMode"));
    assert_eq!(
        action["args"][1]["values"],
        json!([
            {"id": "home", "label": {"en": "Home"}},
            {"id": "away", "label": {"en": "Away"}}
        ])
    );
    assert_eq!(app["flow"]["actions"].as_array().map(Vec::len), Some(1));

    let driver = &app["drivers"][0];
    assert_eq!(driver["id"], json!("zone-temperature"));
    assert_eq!(driver["class"], json!("sensor"));
    assert_eq!(
        driver["capabilities"],
        json!(["measure_temperature.min", "measure_temperature"])
    );
    assert_eq!(
        driver["pair"],
        json!([{"id": "list_devices", "template": "list_devices"}])
    );

    // show never writes files
    assert!(!test.root().join("app.json").exists());
    assert_eq!(test.read_json("locales/en.json")?, json!({"common": {"zone": "Zone"}}));

    Ok(())
}

#[test]
fn test_show_reports_skipped_entries_on_stderr() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.show_command().output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipped-entry"), "stderr: {}", stderr);
    assert!(stderr.contains("Undocumented"));
    assert!(stderr.contains("1 error"));
    assert!(output.status.success());

    Ok(())
}

#[test]
fn test_show_minify() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.show_command().arg("--minify").output()?;
    let stdout = String::from_utf8(output.stdout)?;
    assert_eq!(stdout.trim_end().lines().count(), 1);
    assert!(stdout.starts_with("{\"id\":\"com.example.zones\""));

    Ok(())
}

#[test]
fn test_show_missing_package_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("triggers.ts", crate::TRIGGERS)?;

    let output = test.show_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error:"), "stderr: {}", stderr);
    assert!(stderr.contains("package.json"));

    Ok(())
}

#[test]
fn test_show_parse_error_is_an_error() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("actions.ts", "export interface IActions {")?;

    let output = test.show_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to parse"));

    Ok(())
}
