//! Local UI preferences persisted as a small JSON object on disk.
//!
//! Values are stored as raw strings so a hand-edited or stale file can
//! hold anything; reads validate and fall back to defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

#[cfg(test)]
mod tests;

pub const THEME_KEY: &str = "theme";
pub const SIDEBAR_KEY: &str = "sidebar:state";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preferences I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("preferences encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme: {0}")]
pub struct UnknownTheme(pub String);

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub theme: Theme,
    pub sidebar_open: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            sidebar_open: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl PreferenceStore {
    /// Opens the store at `path`. A missing file is an empty store; an
    /// unreadable one is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable preferences");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, PrefsError> {
        match fs::read_to_string(path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn persist(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn theme(&self) -> Theme {
        match self.entries.get(THEME_KEY) {
            None => Theme::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err: UnknownTheme| {
                warn!(error = %err, "stored theme is invalid, using default");
                Theme::default()
            }),
        }
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), PrefsError> {
        self.entries.insert(THEME_KEY.to_string(), theme.as_str().to_string());
        self.persist()
    }

    pub fn sidebar_open(&self) -> bool {
        match self.entries.get(SIDEBAR_KEY).map(String::as_str) {
            None | Some("true") => true,
            Some("false") => false,
            Some(other) => {
                warn!(value = other, "stored sidebar state is invalid, using default");
                true
            }
        }
    }

    pub fn set_sidebar_open(&mut self, open: bool) -> Result<(), PrefsError> {
        self.entries.insert(SIDEBAR_KEY.to_string(), open.to_string());
        self.persist()
    }

    pub fn preferences(&self) -> UserPreferences {
        UserPreferences {
            theme: self.theme(),
            sidebar_open: self.sidebar_open(),
        }
    }

    pub fn clear_all(&mut self) -> Result<(), PrefsError> {
        self.entries.remove(THEME_KEY);
        self.entries.remove(SIDEBAR_KEY);
        self.persist()
    }

    /// Probe whether the store's directory accepts writes.
    pub fn is_available(&self) -> bool {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let probe = dir.join(".synth-prefs-probe");
        fs::create_dir_all(&dir).is_ok()
            && fs::write(&probe, b"probe").is_ok()
            && fs::remove_file(&probe).is_ok()
    }
}
