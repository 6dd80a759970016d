//! User settings (`~/.config/shelf/settings.toml`) and data directory resolution.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shelf_catalog::DEFAULT_PAGE_SIZE;

/// Environment variable overriding the data directory.
pub(crate) const DATA_DIR_ENV: &str = "SHELF_DATA_DIR";

/// Spreadsheet used by `fetch-updates` when none is configured.
pub(crate) const DEFAULT_SHEET_ID: &str = "1wganKHEJps87WhFI2O_xyVw-3vkTshmaf665OKczbwc";

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub storage: StorageSettings,
    pub view: ViewSettings,
    pub import: ImportSettings,
    pub colors: ColorSettings,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StorageSettings {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ViewSettings {
    pub page_size: Option<usize>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ImportSettings {
    pub sheet_id: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Value → color-name tables. Keys match case-insensitively.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ColorSettings {
    pub genre: BTreeMap<String, String>,
    pub status: BTreeMap<String, String>,
    pub tag: BTreeMap<String, String>,
}

impl Settings {
    /// Load from the standard location. Missing or unreadable files give defaults.
    pub(crate) fn load() -> Self {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub(crate) fn load_from(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match toml::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring malformed settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub(crate) fn page_size(&self) -> usize {
        self.view.page_size.filter(|n| *n > 0).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub(crate) fn sheet_id(&self) -> &str {
        self.import.sheet_id.as_deref().unwrap_or(DEFAULT_SHEET_ID)
    }

    pub(crate) fn fetch_timeout(&self) -> std::time::Duration {
        self.import
            .timeout_secs
            .map(std::time::Duration::from_secs)
            .unwrap_or(shelf_import::DEFAULT_TIMEOUT)
    }
}

/// Canonical path to the settings file.
pub(crate) fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shelf").join("settings.toml"))
}

/// Where the data directory came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DataDirSource {
    Flag,
    EnvVar(&'static str),
    SettingsFile,
    CurrentDir,
}

impl fmt::Display for DataDirSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => write!(f, "--data-dir"),
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::SettingsFile => write!(f, "settings file"),
            Self::CurrentDir => write!(f, "current directory"),
        }
    }
}

/// Resolve the data directory using a priority chain:
///
/// 1. `--data-dir` flag
/// 2. `SHELF_DATA_DIR`
/// 3. `storage.data_dir` in the settings file
/// 4. Current working directory
pub(crate) fn resolve_data_dir(flag: Option<PathBuf>, settings: &Settings) -> (PathBuf, DataDirSource) {
    resolve_data_dir_with(
        flag,
        std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
        settings,
    )
}

fn resolve_data_dir_with(
    flag: Option<PathBuf>,
    env: Option<PathBuf>,
    settings: &Settings,
) -> (PathBuf, DataDirSource) {
    if let Some(p) = flag {
        return (p, DataDirSource::Flag);
    }
    if let Some(p) = env.filter(|p| !p.as_os_str().is_empty()) {
        return (p, DataDirSource::EnvVar(DATA_DIR_ENV));
    }
    if let Some(p) = settings.storage.data_dir.clone() {
        return (p, DataDirSource::SettingsFile);
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    (cwd, DataDirSource::CurrentDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_env_and_settings() {
        let mut settings = Settings::default();
        settings.storage.data_dir = Some(PathBuf::from("/from/settings"));

        let (dir, source) = resolve_data_dir_with(
            Some(PathBuf::from("/from/flag")),
            Some(PathBuf::from("/from/env")),
            &settings,
        );
        assert_eq!(dir, PathBuf::from("/from/flag"));
        assert_eq!(source, DataDirSource::Flag);

        let (dir, source) =
            resolve_data_dir_with(None, Some(PathBuf::from("/from/env")), &settings);
        assert_eq!(dir, PathBuf::from("/from/env"));
        assert_eq!(source, DataDirSource::EnvVar(DATA_DIR_ENV));

        let (dir, source) = resolve_data_dir_with(None, Some(PathBuf::new()), &settings);
        assert_eq!(dir, PathBuf::from("/from/settings"));
        assert_eq!(source, DataDirSource::SettingsFile);
    }

    #[test]
    fn falls_back_to_current_dir() {
        let (_, source) = resolve_data_dir_with(None, None, &Settings::default());
        assert_eq!(source, DataDirSource::CurrentDir);
    }

    #[test]
    fn parses_partial_settings_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(
            &path,
            r#"
[view]
page_size = 5

[colors.genre]
"AI ML" = "cyan"
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&path);
        assert_eq!(settings.page_size(), 5);
        assert_eq!(settings.colors.genre.get("AI ML").map(String::as_str), Some("cyan"));
        assert_eq!(settings.sheet_id(), DEFAULT_SHEET_ID);
        assert!(settings.storage.data_dir.is_none());
    }

    #[test]
    fn malformed_or_zero_values_fall_back() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();
        assert_eq!(Settings::load_from(&path).page_size(), DEFAULT_PAGE_SIZE);

        std::fs::write(&path, "[view]\npage_size = 0\n").unwrap();
        assert_eq!(Settings::load_from(&path).page_size(), DEFAULT_PAGE_SIZE);
    }
}
