use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Base URL of the upstream weather API. Overridable from config, which is
/// also what the integration tests point at a local mock server.
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// City queried whenever no device position can be obtained.
pub const DEFAULT_CITY: &str = "Kuala Lumpur";

/// Fixed coordinates, used instead of live geolocation when configured.
///
/// Example TOML:
/// [position]
/// latitude = 3.139
/// longitude = 101.6869
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FixedPosition {
    pub latitude: f64,
    pub longitude: f64,
}

/// Budgets for the device position request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoSettings {
    pub high_accuracy: bool,
    /// Longest the resolver waits for the device before falling back.
    pub timeout_secs: u64,
    /// Oldest cached position the device may hand back.
    pub maximum_age_secs: u64,
}

impl Default for GeoSettings {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout_secs: 10,
            maximum_age_secs: 60,
        }
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub units: String,
    /// Fallback city when geolocation is absent, denied, or failing.
    pub default_city: String,
    /// Cities looked up ahead of time for the watch list.
    pub preload_cities: Vec<String>,
    pub position: Option<FixedPosition>,
    pub geo: GeoSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            units: "metric".to_string(),
            default_city: DEFAULT_CITY.to_string(),
            preload_cities: Vec::new(),
            position: None,
            geo: GeoSettings::default(),
        }
    }
}

impl Config {
    /// Returns the configured API key or a hint on how to set one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `skycast configure` and enter your OpenWeather API key."
                )
            })
    }

    /// Load config from disk, or return the defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
