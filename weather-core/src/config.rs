use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_BASE_URL: &str = "http://api.weatherstack.com";
pub const DEFAULT_UNITS: &str = "m";
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

pub const ENV_BASE_URL: &str = "WEATHERSTACK_BASE_URL";
pub const ENV_ACCESS_KEY: &str = "WEATHERSTACK_ACCESS_KEY";
pub const ENV_UNITS: &str = "WEATHERSTACK_UNITS";
pub const ENV_BIND: &str = "WEATHER_SERVER_BIND";
pub const ENV_ALLOWED_ORIGIN: &str = "WEATHER_SERVER_ALLOWED_ORIGIN";

/// Upstream weather provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub access_key: Option<String>,
    /// Weatherstack unit system: "m", "s" or "f".
    pub units: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_key: None,
            units: DEFAULT_UNITS.to_string(),
        }
    }
}

impl ProviderConfig {
    /// Returns the access key, failing with a hint when it is missing or blank.
    pub fn require_access_key(&self) -> Result<&str> {
        self.access_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No access key configured for the weather provider.\n\
                     Hint: run `weather-server configure` or set {ENV_ACCESS_KEY}."
                )
            })
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    /// The single origin allowed to make cross-origin requests.
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind: DEFAULT_BIND.to_string(), allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string() }
    }
}

/// Top-level configuration.
///
/// Example TOML:
/// ```toml
/// [provider]
/// access_key = "..."
///
/// [server]
/// bind = "127.0.0.1:8000"
/// allowed_origin = "http://localhost:3000"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Load config from the platform config directory, or defaults if the file doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay values from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`; empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_BASE_URL) {
            self.provider.base_url = v;
        }
        if let Some(v) = get(ENV_ACCESS_KEY) {
            self.provider.access_key = Some(v);
        }
        if let Some(v) = get(ENV_UNITS) {
            self.provider.units = v;
        }
        if let Some(v) = get(ENV_BIND) {
            self.server.bind = v;
        }
        if let Some(v) = get(ENV_ALLOWED_ORIGIN) {
            self.server.allowed_origin = v;
        }

        self
    }
}
