use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".transyncrc.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Locales to import and export. `null` means every locale found.
    #[serde(default)]
    pub locales: Option<Vec<String>>,
    #[serde(default = "default_import_path")]
    pub import_path: String,
    #[serde(default = "default_export_path")]
    pub export_path: String,
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

fn default_import_path() -> String {
    "./resources/lang".to_string()
}

fn default_export_path() -> String {
    "./storage/translator/lang".to_string()
}

fn default_database_path() -> String {
    "./.transync/translations.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales: None,
            import_path: default_import_path(),
            export_path: default_export_path(),
            database_path: default_database_path(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Locale codes must be non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        if let Some(locales) = &self.locales {
            validate_locales(locales).context("Invalid 'locales' in config")?;
        }
        if self.import_path.trim().is_empty() {
            bail!("'importPath' must not be empty");
        }
        if self.export_path.trim().is_empty() {
            bail!("'exportPath' must not be empty");
        }
        if self.database_path.trim().is_empty() {
            bail!("'databasePath' must not be empty");
        }
        Ok(())
    }

    /// The locale filter, with an empty list meaning "no filter".
    pub fn only_locales(&self) -> Option<Vec<String>> {
        self.locales.clone().filter(|l| !l.is_empty())
    }
}

pub fn validate_locales(locales: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for locale in locales {
        if locale.trim().is_empty() {
            bail!("locale codes must not be empty");
        }
        if !seen.insert(locale.as_str()) {
            bail!("duplicate locale \"{}\"", locale);
        }
    }
    Ok(())
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
    /// Directory that relative config paths are resolved against.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}

/// Values given on the command line (or by an MCP client) that take
/// precedence over the config file. Relative paths are resolved against the
/// start directory.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub locales: Option<Vec<String>>,
    pub import_path: Option<PathBuf>,
    pub export_path: Option<PathBuf>,
    pub database_path: Option<PathBuf>,
}

/// Fully resolved settings for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub locales: Option<Vec<String>>,
    pub import_path: PathBuf,
    pub export_path: PathBuf,
    pub database_path: PathBuf,
    pub from_file: bool,
}

impl Workspace {
    pub fn load(start_dir: &Path, overrides: &ConfigOverrides) -> Result<Self> {
        let ConfigLoadResult {
            config,
            from_file,
            base_dir,
        } = load_config(start_dir)?;

        let locales = match &overrides.locales {
            Some(locales) => {
                validate_locales(locales).context("Invalid --locales")?;
                Some(locales.clone()).filter(|l| !l.is_empty())
            }
            None => config.only_locales(),
        };

        let resolve = |over: &Option<PathBuf>, configured: &str| match over {
            Some(path) => resolve_path(start_dir, path),
            None => resolve_path(&base_dir, Path::new(configured)),
        };

        let workspace = Self {
            locales,
            import_path: resolve(&overrides.import_path, &config.import_path),
            export_path: resolve(&overrides.export_path, &config.export_path),
            database_path: resolve(&overrides.database_path, &config.database_path),
            from_file,
        };

        // Export wipes its destination, which must hold neither the import
        // source nor the store.
        if workspace.import_path.starts_with(&workspace.export_path) {
            bail!(
                "Export path {} must not contain the import path {}",
                workspace.export_path.display(),
                workspace.import_path.display()
            );
        }
        if workspace.database_path.starts_with(&workspace.export_path) {
            bail!(
                "Export path {} must not contain the database path {}",
                workspace.export_path.display(),
                workspace.database_path.display()
            );
        }

        Ok(workspace)
    }
}

/// Join `path` onto `base` unless it is absolute, dropping `.` components.
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    joined
        .components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
