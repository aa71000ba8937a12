use anyhow::Result;
use serde_json::json;

use crate::CliTest;

#[test]
fn test_generate_writes_localized_manifest() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.generate_command().output()?;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let app = test.read_json("app.json")?;
    let trigger = &app["flow"]["triggers"][0];
    assert_eq!(
        trigger["title"],
        json!({"en": "The temperature is too cold", "sv": "Temperaturen är för kall"})
    );
    assert_eq!(trigger["tokens"][0]["title"], json!({"en": "Zone", "sv": "Zon"}));
    assert_eq!(
        trigger["tokens"][0]["example"],
        json!({"en": "Kitchen", "sv": "Kök"})
    );
    assert_eq!(trigger["tokens"][1]["example"], json!(14.5));

    let action = &app["flow"]["actions"][0];
    assert_eq!(action["title"], json!({"en": "Set the zone mode", "sv": "Ställ in zonläge"}));
    assert_eq!(action["args"][1]["title"], json!({"en": "mode", "sv": "läge"}));

    let driver = &app["drivers"][0];
    assert_eq!(driver["name"], json!({"en": "Zone Temperature", "sv": "Zontemperatur"}));

    Ok(())
}

#[test]
fn test_generate_refreshes_base_locale() -> Result<()> {
    let test = CliTest::with_project()?;

    test.generate_command().output()?;

    let base = test.read_json("locales/en.json")?;
    assert_eq!(
        base,
        json!({
            "common": {"zone": "Zone"},
            "flows": {
                "triggers": {
                    "TooCold": {
                        "title": "The temperature is too cold",
                        "zone": {"example": "Kitchen"},
                        "temperature": {"title": "temperature"}
                    }
                },
                "actions": {
                    "SetZoneMode": {
                        "title": "Set the zone mode",
                        "zone": {"example": "Kitchen"},
                        "mode": {"title": "mode"}
                    }
                }
            },
            "drivers": {
                "zone-temperature": {
                    "name": "Zone Temperature",
                    "capabilities": {
                        "measure_temperature.min": {"title": "Minimum temperature"}
                    }
                }
            }
        })
    );

    // translations are inputs only
    let sv = test.read_json("locales/sv.json")?;
    assert_eq!(sv["common"], json!({"zone": "Zon"}));

    Ok(())
}

#[test]
fn test_generate_reports_missing_translations() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.generate_command().output()?;
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing-translation"), "stderr: {}", stderr);
    assert!(stderr.contains("locale 'sv'"));

    let app = test.read_json("app.json")?;
    // no translation and no common reference: the language stays unset
    assert_eq!(
        app["flow"]["triggers"][0]["tokens"][1]["title"],
        json!({"en": "temperature"})
    );

    Ok(())
}

#[test]
fn test_generate_is_idempotent() -> Result<()> {
    let test = CliTest::with_project()?;

    test.generate_command().output()?;
    let first_app = test.read_file("app.json")?;
    let first_base = test.read_file("locales/en.json")?;

    test.generate_command().output()?;
    assert_eq!(test.read_file("app.json")?, first_app);
    assert_eq!(test.read_file("locales/en.json")?, first_base);

    Ok(())
}

#[test]
fn test_generate_strict_fails_on_skipped_entry() -> Result<()> {
    let test = CliTest::with_project()?;

    let output = test.generate_command().arg("--strict").output()?;
    assert_eq!(output.status.code(), Some(1));
    // the manifest is still written
    assert!(test.root().join("app.json").exists());

    test.write_file(
        "actions.ts",
        r#"
export interface IActions {
    /**
     * Set the zone mode
     * @param args.zone zone #sample:Kitchen
     */
    SetZoneMode(args: { zone: string }): Promise<void>;
}
"#,
    )?;
    let output = test.generate_command().arg("--strict").output()?;
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(())
}

#[test]
fn test_generate_target_and_config() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(".homeycomposerc.json", r#"{"minify": true}"#)?;

    let output = test
        .generate_command()
        .args(["--target", "out/app.json"])
        .output()?;
    assert!(output.status.success());

    let content = test.read_file("out/app.json")?;
    assert_eq!(content.lines().count(), 1);
    assert!(!test.root().join("app.json").exists());

    Ok(())
}

#[test]
fn test_generate_new_common_key_gets_placeholder() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("locales/en.json", "{}")?;

    test.generate_command().output()?;

    let base = test.read_json("locales/en.json")?;
    assert_eq!(base["common"], json!({"zone": "TODO"}));
    let app = test.read_json("app.json")?;
    assert_eq!(
        app["flow"]["triggers"][0]["tokens"][0]["title"],
        json!({"en": "TODO", "sv": "Zon"})
    );

    Ok(())
}
