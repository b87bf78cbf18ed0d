use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::api::client::DEFAULT_BASE_URL;
use crate::error::{LookupError, Result};

const CONFIG_DIR_NAME: &str = ".dirlook";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Environment variable carrying the bearer credential; takes precedence
/// over the config file
pub const TOKEN_ENV_VAR: &str = "DIRLOOK_TOKEN";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DirectoryConfig {
    /// Bearer token for the directory API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Base URL override for the directory API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Config {
    /// Get the configuration directory path
    pub fn config_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| LookupError::Config("Could not determine home directory".to_string()))?;

        Ok(home_dir.join(CONFIG_DIR_NAME))
    }

    /// Get the configuration file full path
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_path()?.join(CONFIG_FILE_NAME))
    }

    /// Initialize configuration directory and file
    pub fn initialize() -> Result<()> {
        let config_dir = Self::config_path()?;

        // The file carries a credential; keep it private to the owner
        if !config_dir.exists() {
            fs::create_dir_all(&config_dir).map_err(|e| {
                LookupError::Config(format!("Failed to create config directory: {}", e))
            })?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = fs::Permissions::from_mode(0o700);
                fs::set_permissions(&config_dir, permissions).map_err(|e| {
                    LookupError::Config(format!("Failed to set directory permissions: {}", e))
                })?;
            }
        }

        let config_file = Self::config_file_path()?;

        if !config_file.exists() {
            let default_config = Self::default();
            let yaml = serde_yaml::to_string(&default_config)
                .map_err(|e| LookupError::Config(format!("Failed to serialize config: {}", e)))?;

            fs::write(&config_file, yaml)
                .map_err(|e| LookupError::Config(format!("Failed to write config file: {}", e)))?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let permissions = fs::Permissions::from_mode(0o600);
                fs::set_permissions(&config_file, permissions).map_err(|e| {
                    LookupError::Config(format!("Failed to set file permissions: {}", e))
                })?;
            }
        }

        Ok(())
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::initialize()?;

        let config_file = Self::config_file_path()?;
        let contents = fs::read_to_string(&config_file)
            .map_err(|e| LookupError::Config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_yaml::from_str(&contents)
            .map_err(|e| LookupError::Config(format!("Failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        Self::initialize()?;

        let config_file = Self::config_file_path()?;
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| LookupError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_file, yaml)
            .map_err(|e| LookupError::Config(format!("Failed to write config file: {}", e)))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&config_file, permissions).map_err(|e| {
                LookupError::Config(format!("Failed to set file permissions: {}", e))
            })?;
        }

        Ok(())
    }

    /// Get the bearer token, preferring the environment variable
    pub fn get_token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|token| !token.is_empty())
            .or_else(|| self.directory.token.clone())
    }

    /// Get the API base URL
    pub fn get_base_url(&self) -> String {
        self.directory
            .url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Set a configuration value by key path
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "directory.token" => {
                self.directory.token = Some(value.to_string());
            }
            "directory.url" => {
                self.directory.url = Some(value.to_string());
            }
            _ => {
                return Err(LookupError::Config(format!(
                    "Unknown configuration key: {}",
                    key
                )));
            }
        }

        self.save()?;
        Ok(())
    }

    /// Get a configuration value by key path
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            "directory.token" => Ok(self.directory.token.clone()),
            "directory.url" => Ok(self.directory.url.clone()),
            _ => Err(LookupError::Config(format!(
                "Unknown configuration key: {}",
                key
            ))),
        }
    }
}
