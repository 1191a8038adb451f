//! Loading and saving the session settings blob and tuning overrides.
//!
//! Both files are plain JSON. A missing settings file is not an error: the
//! run falls back to defaults. A missing tuning file is only an error when
//! the caller asked for one explicitly.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use arena_core::config::{SessionSettings, Tuning};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize settings for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl SettingsError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn parse(path: &Path, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// File-backed store for the settings blob.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the blob. A missing file yields the defaults.
    pub fn load(&self) -> Result<SessionSettings, SettingsError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(SessionSettings::default());
            }
            Err(err) => return Err(SettingsError::io(&self.path, err)),
        };
        serde_json::from_str(&json).map_err(|err| SettingsError::parse(&self.path, err))
    }

    /// Write the blob, creating parent directories as needed.
    pub fn save(&self, settings: &SessionSettings) -> Result<(), SettingsError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| SettingsError::io(dir, err))?;
        }
        let json = serde_json::to_string_pretty(settings).map_err(|source| {
            SettingsError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).map_err(|err| SettingsError::io(&self.path, err))?;
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    /// Load the blob, writing the defaults back when no file exists yet.
    pub fn load_or_init(&self) -> Result<SessionSettings, SettingsError> {
        if self.path.exists() {
            return self.load();
        }
        let settings = SessionSettings::default();
        self.save(&settings)?;
        Ok(settings)
    }
}

/// Read a tuning override. Fields absent from the file keep their defaults.
pub fn load_tuning(path: &Path) -> Result<Tuning, SettingsError> {
    let json = fs::read_to_string(path).map_err(|err| SettingsError::io(path, err))?;
    serde_json::from_str(&json).map_err(|err| SettingsError::parse(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("arena_settings_{name}_{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = scratch_dir("missing");
        let store = SettingsStore::new(dir.join("settings.json"));
        assert_eq!(store.load().unwrap(), SessionSettings::default());
        assert!(!store.path().exists(), "load never writes");
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("save");
        let store = SettingsStore::new(dir.join("nested").join("settings.json"));
        let settings = SessionSettings {
            class_index: 2,
            ability_index: 3,
            world_index: 1,
            seed: 1234,
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_or_init_writes_defaults_once() {
        let dir = scratch_dir("init");
        let store = SettingsStore::new(dir.join("settings.json"));
        assert_eq!(store.load_or_init().unwrap(), SessionSettings::default());
        assert!(store.path().exists());

        let custom = SessionSettings {
            seed: 9,
            ..SessionSettings::default()
        };
        store.save(&custom).unwrap();
        assert_eq!(store.load_or_init().unwrap().seed, 9);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_settings_is_parse_error() {
        let dir = scratch_dir("bad");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let err = SettingsStore::new(&path).load().unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
        assert!(err.to_string().contains("settings.json"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_error_messages_name_the_failing_step() {
        let path = PathBuf::from("settings.json");
        let source = || serde_json::from_str::<SessionSettings>("[").unwrap_err();
        let parse = SettingsError::parse(&path, source());
        let serialize = SettingsError::Serialize {
            path: path.clone(),
            source: source(),
        };
        assert!(parse.to_string().starts_with("failed to parse settings.json"));
        assert!(serialize
            .to_string()
            .starts_with("failed to serialize settings for settings.json"));
    }

    #[test]
    fn test_partial_tuning_keeps_defaults() {
        let dir = scratch_dir("tuning");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tuning.json");
        fs::write(&path, r#"{ "enemy_capacity": 12 }"#).unwrap();

        let tuning = load_tuning(&path).unwrap();
        assert_eq!(tuning.enemy_capacity, 12);
        assert_eq!(tuning.enemy_spawn_radius, Tuning::default().enemy_spawn_radius);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_tuning_is_io_error() {
        let dir = scratch_dir("no_tuning");
        let err = load_tuning(&dir.join("tuning.json")).unwrap_err();
        assert!(matches!(err, SettingsError::Io { .. }));
    }
}
