//! Settings sources.
//!
//! A settings source is a flat key/value view over wherever the host keeps
//! its configuration. Only two keys are recognized: [`SAVE_PATH`] and
//! [`EXTENSION`]. A key that is missing or holds an empty string means
//! "use the default"; it is never an error.
//!
//! The on-disk form is a TOML file:
//! ```toml
//! save_path = "~/notes/scratch"
//! extension = ".txt"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, ScratchError};

/// Key overriding the directory scratch files are written to.
pub const SAVE_PATH: &str = "save_path";

/// Key overriding the default file extension.
pub const EXTENSION: &str = "extension";

/// Read-only key/value configuration store.
pub trait SettingsSource {
    /// Raw value for `key`, if the source has one.
    fn get(&self, key: &str) -> Option<String>;
}

/// Settings as stored in a settings file. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub save_path: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
}

impl Settings {
    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ScratchError::Configuration`] if the text is not valid TOML
    /// or a recognized key holds a non-string value.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ScratchError::Configuration(e.to_string()))
    }

    /// Load settings from a TOML file. A missing file yields empty settings.
    ///
    /// # Errors
    ///
    /// Returns [`ScratchError::Configuration`] if the file exists but cannot
    /// be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ScratchError::Configuration(format!(
                    "{}: {e}",
                    path.display()
                )))
            }
        };

        Self::from_toml_str(&text).map_err(|e| match e {
            ScratchError::Configuration(msg) => {
                ScratchError::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Layer these settings on top of `base`: a non-empty value here wins,
    /// anything else falls through to `base`.
    pub fn over<'a>(&'a self, base: &'a dyn SettingsSource) -> Layered<'a> {
        Layered { top: self, base }
    }
}

impl SettingsSource for Settings {
    fn get(&self, key: &str) -> Option<String> {
        match key {
            SAVE_PATH => self.save_path.clone(),
            EXTENSION => self.extension.clone(),
            _ => None,
        }
    }
}

/// Two settings sources stacked; see [`Settings::over`].
pub struct Layered<'a> {
    top: &'a dyn SettingsSource,
    base: &'a dyn SettingsSource,
}

impl SettingsSource for Layered<'_> {
    fn get(&self, key: &str) -> Option<String> {
        self.top
            .get(key)
            .filter(|v| !v.is_empty())
            .or_else(|| self.base.get(key))
    }
}
