use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::Value;
use tempfile::TempDir;

mod generate;
mod init;
mod show;

const BIN_NAME: &str = "homey-composer";

pub const PACKAGE: &str = r#"{
  "name": "com.example.zones",
  "version": "1.2.0",
  "bugs": {"url": "https://example.com/issues"}
}"#;

pub const APP: &str = r#"{
  "id": "placeholder",
  "sdk": 3,
  "name": {"en": "Zones"},
  "flow": {"conditions": []}
}"#;

pub const TRIGGERS: &str = r#"
export class Triggers {
    /**
     * The temperature is too cold
     * @param zone $common.zone #sample:Kitchen
     * @param temperature temperature #sample:14.5
     */
    public onTooCold(zone: string, temperature: number) {}

    private helper() {}
}
"#;

pub const ACTIONS: &str = r#"
export interface IActions {
    /**
     * Set the zone mode
     * @param args.zone $common.zone #sample:Kitchen
     * @param args.mode mode #dropdown:{"home":"Home","away":"Away"}
     */
    SetZoneMode(args: { zone: string; mode: string }): Promise<void>;

    Undocumented(args: { zone: string }): Promise<void>;
}
"#;

pub const DRIVER: &str = r#"
export const capabilities = {
    /** Minimum temperature */
    min: "measure_temperature.min",
    temp: "measure_temperature",
};

/**
 * Zone Temperature
 * #class:sensor
 */
export default class ZoneTemperatureDriver extends Driver {}
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with package, baseline app, triggers, actions, one driver and two
    /// locales.
    pub fn with_project() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("package.json", PACKAGE)?;
        test.write_file(".homeycompose/app.json", APP)?;
        test.write_file("triggers.ts", TRIGGERS)?;
        test.write_file("actions.ts", ACTIONS)?;
        test.write_file("drivers/zone-temperature/driver.ts", DRIVER)?;
        test.write_file(
            "drivers/zone-temperature/driver.compose.json",
            r#"{"pair": [{"id": "list_devices", "template": "list_devices"}]}"#,
        )?;
        test.write_file("locales/en.json", r#"{"common": {"zone": "Zone"}}"#)?;
        test.write_file(
            "locales/sv.json",
            r#"{
  "common": {"zone": "Zon"},
  "flows": {
    "triggers": {"TooCold": {"title": "Temperaturen är för kall", "zone": {"example": "Kök"}}},
    "actions": {"SetZoneMode": {"title": "Ställ in zonläge", "mode": {"title": "läge"}}}
  },
  "drivers": {"zone-temperature": {"name": "Zontemperatur"}}
}"#,
        )?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn show_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("show");
        cmd
    }

    pub fn generate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("generate");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }

    pub fn read_json(&self, path: &str) -> Result<Value> {
        let content = self.read_file(path)?;
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path))
    }
}
