use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::core::data::{Driver, LocaleStore};

/// The fields of `package.json` copied into the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub bugs: Option<Value>,
    #[serde(default)]
    pub author: Option<Value>,
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON file: {:?}", path))
}

/// Like [`read_json`], but a missing file yields `T::default()`.
pub fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    read_json(path)
}

pub fn read_package(path: &Path) -> Result<PackageInfo> {
    read_json(path)
}

/// Read a `driver.compose.json` baseline.
///
/// A missing or unreadable baseline is treated as empty: the driver is then composed
/// from its source alone.
pub fn read_driver_baseline(path: &Path) -> Driver {
    if !path.exists() {
        return Driver::default();
    }
    match read_json(path) {
        Ok(driver) => driver,
        Err(e) => {
            tracing::warn!("{:#}; using an empty baseline", e);
            Driver::default()
        }
    }
}

pub fn read_locale(path: &Path) -> Result<LocaleStore> {
    read_json(path)
}

/// A locale file found under the locales root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFile {
    /// Language code, taken from the file stem.
    pub code: String,
    pub path: PathBuf,
}

/// List `<root>/<code>.json` files sorted by file name.
pub fn scan_locale_files(root: &Path) -> Result<Vec<LocaleFile>> {
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let pattern = root.join("*.json");
    let pattern = pattern.to_string_lossy();
    let mut files = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("Invalid locale pattern: {}", pattern))?
    {
        let path = entry.context("Failed to read locale directory entry")?;
        let Some(code) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        files.push(LocaleFile {
            code: code.to_string(),
            path: path.clone(),
        });
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Serialize with two-space indentation, or on one line when `minify` is set.
pub fn to_json_string<T: Serialize>(value: &T, minify: bool) -> Result<String> {
    let json = if minify {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T, minify: bool) -> Result<()> {
    let mut json = to_json_string(value, minify)?;
    json.push('\n');
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    fs::write(path, json).with_context(|| format!("Failed to write JSON file: {:?}", path))
}
