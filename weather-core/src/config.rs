use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_WEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_TRANSLATE_URL: &str = "https://libretranslate.de/translate";

/// Output format of the process logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// listen_host = "0.0.0.0"
/// listen_port = 8080
/// db_path = "/var/lib/weather/weather.db"
/// weather_api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub listen_host: String,
    pub listen_port: u16,
    pub db_path: PathBuf,

    /// Credential sent as `APPID` to the weather provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_api_key: Option<String>,
    pub weather_url: String,

    pub translate_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_api_key: Option<String>,

    /// Per-request timeout for both upstreams. Unset means wait indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upstream_timeout_secs: Option<u64>,

    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_host: "localhost".to_string(),
            listen_port: 8080,
            db_path: PathBuf::from("weather.db"),
            weather_api_key: None,
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            translate_api_key: None,
            upstream_timeout_secs: None,
            log_level: "debug".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from an explicit path, or defaults if the file doesn't exist.
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

    /// Save config to an explicit path, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
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

    /// Returns the weather API key, or an error with a hint when it is missing.
    pub fn weather_api_key(&self) -> Result<&str> {
        self.weather_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No weather API key configured.\n\
                     Hint: run `weather-server configure` or set WEATHER_API_KEY."
                )
            })
    }

    pub fn upstream_timeout(&self) -> Option<Duration> {
        self.upstream_timeout_secs.map(Duration::from_secs)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.listen_host, self.listen_port)
    }
}
