//! Configuration resolution.
//!
//! Turns the raw values of a [`SettingsSource`] into a [`Config`] with every
//! default applied: the save path is home-expanded and absolute, and the
//! extension has no leading `.`.

use std::path::{Path, PathBuf};

use crate::error::{FsOp, Result, ScratchError};
use crate::settings::{SettingsSource, EXTENSION, SAVE_PATH};

/// Directory used when `save_path` is not configured.
pub const DEFAULT_SAVE_PATH: &str = "~/scratch";

/// Extension used when `extension` is not configured.
pub const DEFAULT_EXTENSION: &str = "md";

/// Resolved configuration for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute directory scratch files are created in.
    pub save_path: PathBuf,
    /// Default extension, never starting with `.`.
    pub extension: String,
}

/// Resolve configuration and make sure the save directory exists.
///
/// The directory is created if missing, but only one level deep: a missing
/// parent is an error.
///
/// # Errors
///
/// Returns [`ScratchError::Filesystem`] if the directory cannot be created or
/// the save path cannot be made absolute.
pub fn resolve(settings: &dyn SettingsSource) -> Result<Config> {
    let config = resolve_without_create(settings)?;
    ensure_dir(&config.save_path)?;
    Ok(config)
}

/// Resolve configuration without touching the filesystem.
///
/// # Errors
///
/// Returns [`ScratchError::Filesystem`] if a relative save path cannot be
/// made absolute.
pub fn resolve_without_create(settings: &dyn SettingsSource) -> Result<Config> {
    resolve_with_home(settings, dirs::home_dir().as_deref())
}

fn resolve_with_home(settings: &dyn SettingsSource, home: Option<&Path>) -> Result<Config> {
    let raw_path =
        non_empty(settings.get(SAVE_PATH)).unwrap_or_else(|| DEFAULT_SAVE_PATH.to_string());
    let expanded = expand_home_with(&raw_path, home);
    let save_path = std::path::absolute(&expanded)
        .map_err(|e| ScratchError::fs(FsOp::ResolvePath, &expanded, e))?;

    let raw_ext =
        non_empty(settings.get(EXTENSION)).unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let extension = normalize_extension(&raw_ext).to_string();

    let config = Config {
        save_path,
        extension,
    };
    tracing::debug!(
        save_path = %config.save_path.display(),
        extension = %config.extension,
        "resolved configuration"
    );
    Ok(config)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Strip any leading run of `.` characters from an extension.
pub fn normalize_extension(ext: &str) -> &str {
    ext.trim_start_matches('.')
}

/// Expand a leading `~` the way a shell would.
///
/// `~` and `~/rest` expand against `home`; anything else, including
/// `~user` forms and an unknown home, is returned unchanged.
fn expand_home_with(path: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(path);
    };
    if path == "~" {
        return home.to_path_buf();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest.trim_start_matches('/')),
        None => PathBuf::from(path),
    }
}

fn ensure_dir(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    std::fs::create_dir(path).map_err(|e| ScratchError::fs(FsOp::CreateDir, path, e))?;
    tracing::info!(path = %path.display(), "created scratch directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use proptest::prelude::*;

    fn settings(save_path: Option<&str>, extension: Option<&str>) -> Settings {
        Settings {
            save_path: save_path.map(str::to_string),
            extension: extension.map(str::to_string),
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let home = Path::new("/home/ada");
        let config = resolve_with_home(&Settings::default(), Some(home)).unwrap();
        assert_eq!(config.save_path, home.join("scratch"));
        assert_eq!(config.extension, "md");
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let home = Path::new("/home/ada");
        let config = resolve_with_home(&settings(Some(""), Some("")), Some(home)).unwrap();
        assert_eq!(config.save_path, home.join("scratch"));
        assert_eq!(config.extension, "md");
    }

    #[test]
    fn defaulting_is_idempotent() {
        let first = resolve_without_create(&Settings::default()).unwrap();
        let second = resolve_without_create(&Settings::default()).unwrap();
        assert_eq!(first, second);
        assert!(first.save_path.is_absolute());
        assert!(first.save_path.ends_with("scratch"));
        assert_eq!(first.extension, "md");
    }

    #[test]
    fn configured_values_override_defaults() {
        let config =
            resolve_with_home(&settings(Some("/var/notes"), Some("..txt")), None).unwrap();
        assert_eq!(config.save_path, PathBuf::from("/var/notes"));
        assert_eq!(config.extension, "txt");
    }

    #[test]
    fn relative_save_path_is_made_absolute() {
        let config = resolve_with_home(&settings(Some("notes"), None), None).unwrap();
        assert!(config.save_path.is_absolute());
        assert!(config.save_path.ends_with("notes"));
    }

    #[test]
    fn normalize_strips_only_leading_dots() {
        assert_eq!(normalize_extension("..md"), "md");
        assert_eq!(normalize_extension(".txt"), "txt");
        assert_eq!(normalize_extension("csv"), "csv");
        assert_eq!(normalize_extension(".tar.gz"), "tar.gz");
    }

    #[test]
    fn expand_home_handles_tilde_forms() {
        let home = Some(Path::new("/home/ada"));
        assert_eq!(expand_home_with("~", home), PathBuf::from("/home/ada"));
        assert_eq!(
            expand_home_with("~/scratch", home),
            PathBuf::from("/home/ada/scratch")
        );
        assert_eq!(expand_home_with("~bob/x", home), PathBuf::from("~bob/x"));
        assert_eq!(expand_home_with("/tmp/~", home), PathBuf::from("/tmp/~"));
        assert_eq!(expand_home_with("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn resolve_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("scratch");
        let config = resolve(&settings(target.to_str(), None)).unwrap();
        assert!(config.save_path.is_dir());
        assert_eq!(config.save_path, target);
    }

    #[test]
    fn resolve_accepts_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("0.md"), "keep").unwrap();
        resolve(&settings(dir.path().to_str(), None)).unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.path().join("0.md")).unwrap(),
            "keep"
        );
    }

    #[test]
    fn resolve_does_not_create_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing").join("scratch");
        let err = resolve(&settings(target.to_str(), None)).unwrap_err();
        assert!(matches!(
            err,
            ScratchError::Filesystem {
                op: FsOp::CreateDir,
                ..
            }
        ));
        assert!(!dir.path().join("missing").exists());
    }

    proptest! {
        #[test]
        fn normalized_extension_never_starts_with_dot(dots in 0usize..5, ext in "[a-z]{1,5}") {
            let raw = format!("{}{}", ".".repeat(dots), ext);
            let config = resolve_with_home(&settings(Some("/s"), Some(&raw)), None).unwrap();
            prop_assert!(!config.extension.starts_with('.'));
            prop_assert_eq!(config.extension, ext);
        }
    }
}
