use std::{
    fs,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result};
use tracing::{debug, info};

use crate::{
    cli::args::CommonArgs,
    config::{CONFIG_FILE_NAME, Config, load_config},
    core::{
        build::{build_actions, build_driver, build_triggers},
        collect::parse_declarations,
        data::{App, Driver, LocaleStore, SourceDecls},
        file_scanner::{DriverFolder, scan_driver_folders},
        locale::{ExtractResult, add_locale, update_base_locale},
        parsers::json::{
            read_driver_baseline, read_json_or_default, read_locale, read_package,
            scan_locale_files, write_json,
        },
    },
    issues::{EntryKind, Issue, SkippedEntryIssue, SourceLocation},
};

/// The composed manifest with everything reported along the way.
pub struct Composition {
    pub app: App,
    pub issues: Vec<Issue>,
    /// Number of TypeScript files read (trigger, action and driver sources).
    pub source_files: usize,
}

/// Result of refreshing the base locale and injecting every language.
pub struct Localization {
    pub issues: Vec<Issue>,
    /// Path of the rewritten base-language store.
    pub base_path: PathBuf,
    pub locale_files: usize,
}

/// Pipeline context: resolved configuration plus the project root.
///
/// # Configuration Priority
///
/// Configuration is loaded with the following priority (highest to lowest):
/// 1. CLI arguments (e.g., `--primary-locale en`)
/// 2. `.homeycomposerc.json` config file
/// 3. Built-in defaults
///
/// # Pipeline
///
/// 1. [`compose`](Self::compose): package metadata, baseline app, triggers, actions and
///    drivers are assembled into the canonical manifest.
/// 2. [`localize`](Self::localize): the base locale store is refreshed from the
///    manifest, then every other language is injected and the base language last.
pub struct ComposeContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,
}

impl ComposeContext {
    /// Create a new `ComposeContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the config file is invalid.
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if !config_result.from_file {
            debug!("No {} found, using default configuration", CONFIG_FILE_NAME);
        }

        let mut config = config_result.config;
        apply_overrides(&mut config, common_args);
        config.validate()?;

        Ok(Self::from_config(config, root_dir))
    }

    pub fn from_config(config: Config, root_dir: PathBuf) -> Self {
        Self { config, root_dir }
    }

    /// Resolve a configured path against the project root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            return p.to_path_buf();
        }
        let is_cur_dir = self
            .root_dir
            .components()
            .all(|c| matches!(c, Component::CurDir));
        if is_cur_dir {
            p.to_path_buf()
        } else {
            let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
            self.root_dir.join(rel)
        }
    }

    // ============================================================
    // Compose
    // ============================================================

    /// Build the canonical manifest.
    ///
    /// A missing trigger or action file keeps the baseline's entries; a missing drivers
    /// root keeps the baseline's drivers. Unreadable or unparsable files abort.
    pub fn compose(&self) -> Result<Composition> {
        let package = read_package(&self.resolve(&self.config.package_file))?;
        let mut app: App = read_json_or_default(&self.resolve(&self.config.app_file))?;
        let mut issues = Vec::new();
        let mut source_files = 0;

        app.id = package.name;
        app.version = package.version;
        if package.bugs.is_some() {
            app.bugs = package.bugs;
        }
        if package.author.is_some() {
            app.author = package.author;
        }

        if let Some(decls) = self.load_source(&self.config.trigger_file)? {
            source_files += 1;
            let result = build_triggers(&decls);
            app.flow.triggers = result.entries;
            issues.extend(result.issues);
        }

        if let Some(decls) = self.load_source(&self.config.action_file)? {
            source_files += 1;
            let result = build_actions(&decls);
            app.flow.actions = result.entries;
            issues.extend(result.issues);
        }

        let drivers_root = self.resolve(&self.config.drivers_root);
        if drivers_root.is_dir() {
            let scan = scan_driver_folders(&drivers_root);
            if scan.skipped_count > 0 {
                info!("Skipped {} unreadable driver folder(s)", scan.skipped_count);
            }
            let mut drivers = Vec::new();
            for folder in &scan.folders {
                let Some(source) = &folder.source else {
                    debug!("Ignoring driver folder {} without implementation", folder.name);
                    continue;
                };
                source_files += 1;
                if let Some(driver) = self.compose_driver(folder, source, &mut issues)? {
                    drivers.push(driver);
                }
            }
            app.drivers = drivers;
        }

        info!(
            "Composed {} triggers, {} actions, {} drivers",
            app.flow.triggers.len(),
            app.flow.actions.len(),
            app.drivers.len()
        );
        Ok(Composition {
            app,
            issues,
            source_files,
        })
    }

    fn compose_driver(
        &self,
        folder: &DriverFolder,
        source: &Path,
        issues: &mut Vec<Issue>,
    ) -> Result<Option<Driver>> {
        let decls = read_source(source)?;
        let baseline = read_driver_baseline(&folder.baseline_path());

        match build_driver(&folder.name, &decls, baseline) {
            Ok(driver) => Ok(Some(driver)),
            Err(e) => {
                debug!("Skipping driver {}: {}", folder.name, e);
                let line = decls.classes().next().map_or(1, |class| class.line);
                issues.push(
                    SkippedEntryIssue::new(
                        SourceLocation::new(&decls.file_path, line),
                        EntryKind::Driver,
                        &folder.name,
                        &e,
                    )
                    .into(),
                );
                Ok(None)
            }
        }
    }

    fn load_source(&self, configured: &str) -> Result<Option<SourceDecls>> {
        let path = self.resolve(configured);
        if !path.is_file() {
            info!("No {} found, skipping", path.display());
            return Ok(None);
        }
        read_source(&path).map(Some)
    }

    // ============================================================
    // Localize
    // ============================================================

    /// Refresh `<localesRoot>/<primaryLocale>.json` from `app` and inject every locale.
    ///
    /// Other languages are injected in file name order before the base language, whose
    /// pass replaces `$common.` references in the canonical text.
    pub fn localize(&self, app: &mut App) -> Result<Localization> {
        let root = self.resolve(&self.config.locales_root);
        let primary = self.config.primary_locale.as_str();
        let base_path = root.join(format!("{}.json", primary));
        let mut issues = Vec::new();

        let store: LocaleStore = read_json_or_default(&base_path)?;
        let ExtractResult {
            store: base,
            issues: extracted,
        } = update_base_locale(app, store);
        issues.extend(extracted);
        write_json(&base_path, &base, false)?;
        info!("Updated {}", base_path.display());

        let files = scan_locale_files(&root)?;
        for file in files.iter().filter(|f| f.code != primary) {
            let store = read_locale(&file.path)?;
            debug!("Adding locale {}", file.code);
            issues.extend(add_locale(&file.code, app, &store));
        }
        issues.extend(add_locale(primary, app, &base));

        Ok(Localization {
            issues,
            base_path,
            locale_files: files.len(),
        })
    }
}

fn apply_overrides(config: &mut Config, common_args: &CommonArgs) {
    let overrides = [
        (&common_args.package_file, &mut config.package_file),
        (&common_args.app_file, &mut config.app_file),
        (&common_args.trigger_file, &mut config.trigger_file),
        (&common_args.action_file, &mut config.action_file),
        (&common_args.drivers_root, &mut config.drivers_root),
        (&common_args.locales_root, &mut config.locales_root),
    ];
    for (arg, value) in overrides {
        if let Some(path) = arg {
            *value = path.to_string_lossy().to_string();
        }
    }

    if let Some(ref primary_locale) = common_args.primary_locale {
        config.primary_locale = primary_locale.clone();
    }
}

fn read_source(path: &Path) -> Result<SourceDecls> {
    let code = fs::read_to_string(path)
        .with_context(|| format!("Failed to read source file: {:?}", path))?;
    let decls = parse_declarations(code, &path.to_string_lossy())?;
    debug!(
        "Collected {} declarations from {}",
        decls.declarations.len(),
        path.display()
    );
    Ok(decls)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use crate::core::context::*;
    use crate::issues::Rule;

    const TRIGGERS: &str = r#"
export class Triggers {
    /**
     * The temperature is too cold
     * @param zone $common.zone #sample:Kitchen
     */
    public onTooCold(zone: string) {}
}
"#;

    const ACTIONS: &str = r#"
export interface IActions {
    /**
     * Set the zone mode
     * @param args.zone $common.zone #sample:Kitchen
     * @param args.mode mode #dropdown:{"home":"Home","away":"Away"}
     */
    SetZoneMode(args: { zone: string; mode: string }): Promise<void>;
}
"#;

    const DRIVER: &str = r#"
export const capabilities = {
    /** Minimum temperature */
    min: "measure_temperature.min",
};

/**
 * Zone Temperature
 * #class:sensor
 */
export default class ZoneTemperatureDriver extends Driver {}
"#;

    fn project() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let write = |path: &str, content: &str| {
            let file = root.join(path);
            fs::create_dir_all(file.parent().unwrap()).unwrap();
            fs::write(file, content).unwrap();
        };
        write(
            "package.json",
            r#"{"name": "com.example.zones", "version": "1.2.0", "author": {"name": "Ada"}}"#,
        );
        write(
            ".homeycompose/app.json",
            r#"{"id": "placeholder", "sdk": 3, "flow": {"conditions": []}}"#,
        );
        write("triggers.ts", TRIGGERS);
        write("actions.ts", ACTIONS);
        write("drivers/zone-temperature/driver.ts", DRIVER);
        write(
            "drivers/broken/driver.ts",
            "/** No class */\nexport default class Broken extends Driver {}",
        );
        write("locales/en.json", r#"{"common": {"zone": "Zone"}}"#);
        write(
            "locales/sv.json",
            r#"{"common": {"zone": "Zon"}, "flows": {"triggers": {"TooCold": {"title": "För kallt"}}}}"#,
        );
        dir
    }

    fn context(dir: &TempDir) -> ComposeContext {
        ComposeContext::from_config(Config::default(), dir.path().to_path_buf())
    }

    #[test]
    fn test_compose() {
        let dir = project();
        let composition = context(&dir).compose().unwrap();
        let app = composition.app;

        assert_eq!(app.id, "com.example.zones");
        assert_eq!(app.version, "1.2.0");
        assert_eq!(app.author, Some(json!({"name": "Ada"})));
        assert_eq!(app.extra["sdk"], json!(3));
        assert_eq!(app.flow.extra["conditions"], json!([]));
        assert_eq!(app.flow.triggers[0].id, "TooCold");
        assert_eq!(app.flow.actions[0].id, "SetZoneMode");

        let ids: Vec<_> = app.drivers.iter().filter_map(|d| d.id.as_deref()).collect();
        assert_eq!(ids, vec!["zone-temperature"]);
        assert_eq!(composition.source_files, 4);

        let rules: Vec<Rule> = composition.issues.iter().map(|i| i.rule()).collect();
        assert_eq!(rules, vec![Rule::SkippedEntry]);
    }

    #[test]
    fn test_compose_without_sources_keeps_baseline() {
        let dir = project();
        fs::remove_file(dir.path().join("triggers.ts")).unwrap();
        fs::remove_dir_all(dir.path().join("drivers")).unwrap();
        fs::write(
            dir.path().join(".homeycompose/app.json"),
            r#"{"flow": {"triggers": [{"id": "Kept", "title": {"en": "Kept"}}]}, "drivers": [{"id": "manual"}]}"#,
        )
        .unwrap();

        let app = context(&dir).compose().unwrap().app;
        assert_eq!(app.flow.triggers[0].id, "Kept");
        assert_eq!(app.drivers[0].id.as_deref(), Some("manual"));
    }

    #[test]
    fn test_missing_package_fails() {
        let dir = project();
        fs::remove_file(dir.path().join("package.json")).unwrap();
        let err = context(&dir).compose().err().unwrap();
        assert!(format!("{:#}", err).contains("package.json"));
    }

    #[test]
    fn test_localize() {
        let dir = project();
        let ctx = context(&dir);
        let mut app = ctx.compose().unwrap().app;
        let localization = ctx.localize(&mut app).unwrap();
        assert_eq!(localization.locale_files, 2);

        let trigger = &app.flow.triggers[0];
        assert_eq!(trigger.title.get("sv"), Some("För kallt"));
        assert_eq!(trigger.tokens[0].title.get("sv"), Some("Zon"));
        assert_eq!(trigger.tokens[0].title.en(), Some("Zone"));

        let base: Value =
            serde_json::from_str(&fs::read_to_string(&localization.base_path).unwrap()).unwrap();
        assert_eq!(base["common"], json!({"zone": "Zone"}));
        assert_eq!(
            base["flows"]["triggers"]["TooCold"]["title"],
            json!("The temperature is too cold")
        );
        assert_eq!(
            base["drivers"]["zone-temperature"]["name"],
            json!("Zone Temperature")
        );
    }

    #[test]
    fn test_localize_tolerates_translator_notes() {
        let dir = project();
        fs::write(
            dir.path().join("locales/sv.json"),
            r#"{"common": {"zone": "Zon"}, "flows": {"triggers": {"TooCold": {"title": "För kallt", "note": "short"}}}}"#,
        )
        .unwrap();
        let ctx = context(&dir);
        let mut app = ctx.compose().unwrap().app;

        ctx.localize(&mut app).unwrap();
        assert_eq!(app.flow.triggers[0].title.get("sv"), Some("För kallt"));
    }

    #[test]
    fn test_localize_creates_base_store() {
        let dir = project();
        fs::remove_dir_all(dir.path().join("locales")).unwrap();
        let ctx = context(&dir);
        let mut app = ctx.compose().unwrap().app;

        let localization = ctx.localize(&mut app).unwrap();
        assert!(dir.path().join("locales/en.json").exists());
        assert_eq!(localization.locale_files, 1);
        assert_eq!(app.flow.triggers[0].tokens[0].title.en(), Some("TODO"));
    }

    #[test]
    fn test_resolve() {
        let ctx = ComposeContext::from_config(Config::default(), PathBuf::from("."));
        assert_eq!(ctx.resolve("./app.json"), PathBuf::from("./app.json"));

        let ctx = ComposeContext::from_config(Config::default(), PathBuf::from("/project"));
        assert_eq!(ctx.resolve("./app.json"), PathBuf::from("/project/app.json"));
        assert_eq!(ctx.resolve("/abs/app.json"), PathBuf::from("/abs/app.json"));
    }
}
