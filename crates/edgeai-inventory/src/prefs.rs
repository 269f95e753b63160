//! Persisted UI preference state.
//!
//! One JSON blob under a fixed key, written through an abstract store so
//! the backing key-value mechanism stays an external collaborator.
//! Unrecognized or corrupt blobs degrade to defaults; only writes can
//! fail.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// Fixed key the preference blob is stored under.
pub const PREFERENCES_KEY: &str = "edgeai_device_explorer_prefs";

/// Result-list presentation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    /// Parses a persisted value; anything unrecognized falls back to grid.
    pub fn from_preference(value: &str) -> Self {
        match value {
            "list" => ViewMode::List,
            _ => ViewMode::Grid,
        }
    }
}

/// The persisted preference blob. Every field is optional on disk;
/// absent fields take these defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub search_term: String,
    pub status_value: String,
    pub model_value: String,
    pub sort_value: String,
    pub view_mode: ViewMode,
    pub expansion_value: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status_value: String::new(),
            model_value: String::new(),
            sort_value: String::new(),
            view_mode: ViewMode::Grid,
            expansion_value: String::new(),
        }
    }
}

/// Abstract preference storage interface.
pub trait PreferenceStore {
    /// Loads the blob, falling back to defaults when absent or corrupt.
    fn load(&self) -> Preferences;

    /// Persists the blob.
    fn save(&self, preferences: &Preferences) -> Result<()>;
}

/// JSON-file-backed store.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    /// Creates a store at the default location
    /// (`~/.edgeai/<key>.json`).
    pub fn new() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            crate::error::EdgeError::config("cannot find home directory")
        })?;
        let dir = home.join(".edgeai");
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            path: dir.join(format!("{PREFERENCES_KEY}.json")),
        })
    }

    /// Creates a store with a custom path (useful for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Preferences {
        if !self.path.exists() {
            return Preferences::default();
        }
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(error = %e, "corrupt preference blob, using defaults");
                Preferences::default()
            }),
            Err(e) => {
                warn!(error = %e, "failed to read preference blob, using defaults");
                Preferences::default()
            }
        }
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        let content = serde_json::to_string_pretty(preferences)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
