use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Implementation file names tried in each driver folder, in order.
pub const DRIVER_SOURCE_FILES: &[&str] = &["DriverImpl.ts", "driver.ts"];

/// Hand-written part of a driver, merged under the extracted values.
pub const DRIVER_BASELINE_FILE: &str = "driver.compose.json";

/// A direct child directory of the drivers root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverFolder {
    /// Folder name, used as the default driver id.
    pub name: String,
    pub path: PathBuf,
    /// First existing implementation file, if any.
    pub source: Option<PathBuf>,
}

impl DriverFolder {
    pub fn baseline_path(&self) -> PathBuf {
        self.path.join(DRIVER_BASELINE_FILE)
    }
}

/// Result of scanning the drivers root.
pub struct ScanResult {
    pub folders: Vec<DriverFolder>,
    pub skipped_count: usize,
}

/// List driver folders sorted by name. A missing root yields no folders.
pub fn scan_driver_folders(root: &Path) -> ScanResult {
    let mut folders = Vec::new();
    let mut skipped_count = 0;

    if !root.is_dir() {
        debug!("Drivers root {} not found", root.display());
        return ScanResult {
            folders,
            skipped_count,
        };
    }

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!("Skipping unreadable entry: {}", e);
                skipped_count += 1;
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            skipped_count += 1;
            continue;
        };

        let path = entry.path().to_path_buf();
        let source = DRIVER_SOURCE_FILES
            .iter()
            .map(|file| path.join(file))
            .find(|file| file.is_file());
        folders.push(DriverFolder {
            name: name.to_string(),
            path,
            source,
        });
    }

    ScanResult {
        folders,
        skipped_count,
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use crate::core::file_scanner::*;

    #[test]
    fn test_scan_driver_folders() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("zone-temperature")).unwrap();
        fs::write(root.join("zone-temperature/driver.ts"), "").unwrap();
        fs::write(root.join("zone-temperature/DriverImpl.ts"), "").unwrap();
        fs::create_dir_all(root.join("air-quality")).unwrap();
        fs::write(root.join("air-quality/driver.ts"), "").unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("README.md"), "").unwrap();

        let result = scan_driver_folders(root);
        let names: Vec<&str> = result.folders.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["air-quality", "empty", "zone-temperature"]);

        assert_eq!(
            result.folders[0].source,
            Some(root.join("air-quality/driver.ts"))
        );
        assert_eq!(result.folders[1].source, None);
        assert_eq!(
            result.folders[2].source,
            Some(root.join("zone-temperature/DriverImpl.ts"))
        );
        assert_eq!(
            result.folders[2].baseline_path(),
            root.join("zone-temperature/driver.compose.json")
        );
    }

    #[test]
    fn test_missing_root() {
        let dir = tempdir().unwrap();
        let result = scan_driver_folders(&dir.path().join("drivers"));
        assert!(result.folders.is_empty());
        assert_eq!(result.skipped_count, 0);
    }
}
