use crate::error::{ConfigError, StorageError};
use crate::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Where the original service listens when run locally.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    pub default_profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Profile {
    pub server_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

impl Config {
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            AppError::Storage(StorageError::ConfigParseError {
                message: e.to_string(),
            })
        })?;

        Ok(config)
    }

    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let config_path = match path {
            Some(p) => p,
            None => Self::config_file_path()?,
        };

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|source| StorageError::FileIo {
                path: parent.to_string_lossy().to_string(),
                source,
            })?;
        }

        let toml_content = toml::to_string(self).map_err(|e| {
            AppError::Storage(StorageError::ConfigSaveFailed {
                message: e.to_string(),
            })
        })?;

        fs::write(&config_path, toml_content).map_err(|source| StorageError::FileIo {
            path: config_path.to_string_lossy().to_string(),
            source,
        })?;

        Ok(())
    }

    fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::ConfigDirNotFound)?;
        Ok(config_dir.join("botmeta-cli").join("config.toml"))
    }

    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Apply a `config set` key to the active profile (or to the config
    /// itself for `default_profile`).
    pub fn set_value(&mut self, profile_name: &str, key: &str, value: &str) -> Result<()> {
        match key {
            "default_profile" => {
                self.default_profile = Some(value.to_string());
                Ok(())
            }
            "server_url" => {
                crate::utils::validation::validate_url(value)?;
                let profile = self.profile_mut(profile_name)?;
                profile.server_url = value.to_string();
                Ok(())
            }
            "timeout_seconds" => {
                let seconds: u64 = value.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "timeout_seconds".to_string(),
                    value: value.to_string(),
                    reason: "expected a non-negative integer".to_string(),
                })?;
                let profile = self.profile_mut(profile_name)?;
                profile.timeout_seconds = Some(seconds);
                Ok(())
            }
            _ => Err(ConfigError::UnknownKey {
                key: key.to_string(),
            }
            .into()),
        }
    }

    fn profile_mut(&mut self, name: &str) -> Result<&mut Profile> {
        self.profiles
            .get_mut(name)
            .ok_or_else(|| {
                ConfigError::ProfileNotFound {
                    name: name.to_string(),
                    hint: "Run any command once to create the default profile".to_string(),
                }
                .into()
            })
    }
}
