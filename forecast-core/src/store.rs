use std::fmt::Debug;
use std::{fs, path::PathBuf};

use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Durable storage for the single persisted value: the last successfully
/// searched city.
///
/// Implementations never fail the caller. `load` treats any storage error
/// as "nothing saved"; `save` overwrites unconditionally and swallows
/// write errors.
pub trait CityStore: Send + Sync + Debug {
    fn load(&self) -> Option<String>;
    fn save(&self, name: &str);
}

/// On-disk state stored as TOML.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct StoredState {
    last_city: Option<String>,
}

/// `CityStore` backed by a TOML file in the platform data directory.
#[derive(Debug, Clone)]
pub struct FileCityStore {
    path: PathBuf,
}

impl FileCityStore {
    /// Open the store at the default platform location.
    pub fn open() -> Result<Self> {
        Ok(Self { path: Self::state_file_path()? })
    }

    /// Open the store at an explicit path.
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path to the state file.
    pub fn state_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("state.toml"))
    }

    fn read(&self) -> Result<StoredState> {
        if !self.path.exists() {
            // First run: nothing saved yet.
            return Ok(StoredState::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file: {}", self.path.display()))?;

        let state: StoredState = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse state file: {}", self.path.display()))?;

        Ok(state)
    }

    fn write(&self, state: &StoredState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create state directory: {}", parent.display())
            })?;
        }

        let toml = toml::to_string_pretty(state).context("Failed to serialize state to TOML")?;

        fs::write(&self.path, toml)
            .with_context(|| format!("Failed to write state file: {}", self.path.display()))?;

        Ok(())
    }
}

impl CityStore for FileCityStore {
    fn load(&self) -> Option<String> {
        match self.read() {
            Ok(state) => state.last_city,
            Err(err) => {
                tracing::debug!("ignoring unreadable state file: {err:#}");
                None
            }
        }
    }

    fn save(&self, name: &str) {
        let state = StoredState { last_city: Some(name.to_owned()) };
        if let Err(err) = self.write(&state) {
            tracing::warn!("failed to persist last city: {err:#}");
        }
    }
}
