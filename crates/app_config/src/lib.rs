// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Tunables of the atom builder, persisted as TOML in the platform config directory:
//!
//! - **Linux:** `~/.config/atom-builder/config.toml`
//! - **macOS:** `~/Library/Application Support/org.atomcad.atom-builder/config.toml`
//! - **Windows:** `%APPDATA%\atomcad\atom-builder\config\config.toml`

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{error, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// How many undo steps are kept. The oldest step is dropped when the limit is exceeded.
    pub history_limit: usize,
    /// Offset between a particle and the copy made of it by "duplicate".
    pub duplicate_offset: [f64; 3],
    /// Half-width of the uniform random jitter added to every clustered position.
    pub jitter: f64,
    /// Radial distance between two consecutive shells of the cluster layout.
    pub layer_spacing: f64,
    /// Number of polar bands the golden-angle spiral cycles through.
    pub points_per_layer: usize,
    /// Grid step that interactively placed particles snap to.
    pub grid_step: f64,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            history_limit: 50,
            duplicate_offset: [0.5, 0.5, 0.0],
            jitter: 0.1,
            layer_spacing: 0.8,
            points_per_layer: 10,
            grid_step: 0.5,
        }
    }
}

impl BuilderConfig {
    /// Returns the path to the config file, or None if the config directory cannot be
    /// determined.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "atomcad", "atom-builder")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Loads the user's config.
    ///
    /// Never fails: a missing file (first run) yields the defaults silently, an unreadable or
    /// corrupted one yields the defaults with a warning.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(err) => {
                warn!("{}, using default settings", err);
                Self::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }

    /// Writes the config, creating its parent directory if it doesn't exist.
    pub fn save_to_path(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| {
                error!("Failed to create config directory {}", parent.display());
                ConfigError::Io {
                    path: parent.to_owned(),
                    source,
                }
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })
    }
}


// End of File
