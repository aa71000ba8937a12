use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".homeycomposerc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_package_file")]
    pub package_file: String,
    /// Hand-written manifest the generated entries are merged into.
    #[serde(default = "default_app_file")]
    pub app_file: String,
    #[serde(default = "default_target")]
    pub target: String,
    #[serde(default = "default_trigger_file")]
    pub trigger_file: String,
    #[serde(default = "default_action_file")]
    pub action_file: String,
    #[serde(default = "default_drivers_root")]
    pub drivers_root: String,
    #[serde(default = "default_locales_root", alias = "localesDir")]
    pub locales_root: String,
    #[serde(default = "default_primary_locale")]
    pub primary_locale: String,
    #[serde(default)]
    pub minify: bool,
}

fn default_package_file() -> String {
    "./package.json".to_string()
}

fn default_app_file() -> String {
    "./.homeycompose/app.json".to_string()
}

fn default_target() -> String {
    "./app.json".to_string()
}

fn default_trigger_file() -> String {
    "./triggers.ts".to_string()
}

fn default_action_file() -> String {
    "./actions.ts".to_string()
}

fn default_drivers_root() -> String {
    "./drivers".to_string()
}

fn default_locales_root() -> String {
    "./locales".to_string()
}

fn default_primary_locale() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package_file: default_package_file(),
            app_file: default_app_file(),
            target: default_target(),
            trigger_file: default_trigger_file(),
            action_file: default_action_file(),
            drivers_root: default_drivers_root(),
            locales_root: default_locales_root(),
            primary_locale: default_primary_locale(),
            minify: false,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if `primaryLocale` is empty or any path is empty.
    pub fn validate(&self) -> Result<()> {
        if self.primary_locale.trim().is_empty() {
            bail!("'primaryLocale' must not be empty");
        }

        let paths = [
            ("packageFile", &self.package_file),
            ("appFile", &self.app_file),
            ("target", &self.target),
            ("triggerFile", &self.trigger_file),
            ("actionFile", &self.action_file),
            ("driversRoot", &self.drivers_root),
            ("localesRoot", &self.locales_root),
        ];
        for (name, value) in paths {
            if value.trim().is_empty() {
                bail!("'{}' must not be empty", name);
            }
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
