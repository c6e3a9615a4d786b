//! calboard configuration at ~/.config/calboard/config.toml

use std::path::{Path, PathBuf};
use std::sync::Arc;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{APP_DIR_NAME, DEFAULT_DATA_DIR, STORAGE_KEY};
use crate::error::{StoreError, StoreResult};
use crate::storage::FileStorage;
use crate::store::EventStore;

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalboardConfig {
    /// Where the event list is persisted (`~` is expanded)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Name of the storage entry holding the event list
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for CalboardConfig {
    fn default() -> Self {
        CalboardConfig {
            data_dir: default_data_dir(),
            storage_key: default_storage_key(),
        }
    }
}

impl CalboardConfig {
    pub fn config_path() -> StoreResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StoreError::Config("Could not determine config directory".into()))?
            .join(APP_DIR_NAME);

        Ok(config_dir.join("config.toml"))
    }

    /// Load the user config, writing a commented default file on first run.
    pub fn load() -> StoreResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (optional) with `CALBOARD_*` environment overrides.
    pub fn load_from(path: &Path) -> StoreResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("CALBOARD"))
            .build()
            .map_err(|e| StoreError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| StoreError::Config(e.to_string()))
    }

    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(full_path_str)
    }

    /// Open the event store over file storage in `data_path()`.
    pub fn open_store(&self) -> EventStore {
        let storage = Arc::new(FileStorage::new(self.data_path()));
        EventStore::open_with_key(storage, self.storage_key.clone())
    }

    pub fn save(&self, path: &Path) -> StoreResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| StoreError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)
            .map_err(|e| StoreError::Config(format!("Could not write config file: {e}")))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> StoreResult<()> {
        let contents = format!(
            "\
# calboard configuration

# Where the shared event list is stored:
# data_dir = \"{}\"

# Storage entry name for the event list:
# storage_key = \"{}\"
",
            DEFAULT_DATA_DIR, STORAGE_KEY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| StoreError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    // `load_from` reads the process environment; serialize tests that call it
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn test_default_file_yields_default_config() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calboard/config.toml");

        CalboardConfig::create_default_config(&path).unwrap();
        let config = CalboardConfig::load_from(&path).unwrap();

        assert_eq!(config, CalboardConfig::default());
    }

    #[test]
    fn test_missing_file_yields_default_config() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let config = CalboardConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.storage_key, STORAGE_KEY);
    }

    #[test]
    fn test_save_then_load() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = CalboardConfig {
            data_dir: dir.path().join("data"),
            storage_key: "demo-events".to_string(),
        };

        config.save(&path).unwrap();

        assert_eq!(CalboardConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_environment_overrides_file_values() {
        let _env = env_lock();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        CalboardConfig {
            data_dir: dir.path().join("from-file"),
            storage_key: "file-events".to_string(),
        }
        .save(&path)
        .unwrap();

        let previous_key = std::env::var_os("CALBOARD_STORAGE_KEY");
        let previous_dir = std::env::var_os("CALBOARD_DATA_DIR");
        // SAFETY: every test touching the environment holds ENV_LOCK
        unsafe {
            std::env::set_var("CALBOARD_STORAGE_KEY", "calboard-env-override-events");
            std::env::set_var("CALBOARD_DATA_DIR", "/srv/calboard-env-override");
        }

        let loaded = CalboardConfig::load_from(&path);

        unsafe {
            match previous_key {
                Some(value) => std::env::set_var("CALBOARD_STORAGE_KEY", value),
                None => std::env::remove_var("CALBOARD_STORAGE_KEY"),
            }
            match previous_dir {
                Some(value) => std::env::set_var("CALBOARD_DATA_DIR", value),
                None => std::env::remove_var("CALBOARD_DATA_DIR"),
            }
        }

        let config = loaded.unwrap();
        assert_eq!(config.storage_key, "calboard-env-override-events");
        assert_eq!(config.data_dir, PathBuf::from("/srv/calboard-env-override"));
    }

    #[test]
    fn test_data_path_expands_tilde() {
        let config = CalboardConfig::default();
        let expanded = config.data_path();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with(".local/share/calboard"));
    }

    #[test]
    fn test_open_store_persists_under_configured_key() {
        let dir = tempfile::tempdir().unwrap();
        let config = CalboardConfig {
            data_dir: dir.path().to_path_buf(),
            storage_key: "demo-events".to_string(),
        };

        let store = config.open_store();

        assert_eq!(store.len(), 4);
        assert!(dir.path().join("demo-events.json").exists());
    }
}
