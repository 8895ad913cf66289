use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

pub const DEFAULT_CITIES_URL: &str = "https://api.dastyar.io/express/clock/cities";
pub const DEFAULT_WEATHER_URL: &str = "https://api.dastyar.io/express/weather";

/// Settings read once at startup. Every field is optional in the TOML file.
/// The set of displayed cities is fixed and not part of the file.
///
/// Example TOML:
/// refresh_interval_secs = 300
/// request_timeout_secs = 10
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub cities_url: String,
    pub weather_url: String,
    /// Passed through as the `theme` query parameter.
    pub theme: String,
    pub refresh_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cities_url: DEFAULT_CITIES_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            theme: "light".to_string(),
            refresh_interval_secs: 600,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or return the defaults
    /// if no file exists there.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load config from an explicit path. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "citytemp", "citytemp")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            bail!("refresh_interval_secs must be greater than zero");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than zero");
        }
        if self.theme.trim().is_empty() {
            bail!("theme must not be empty");
        }

        Url::parse(&self.cities_url)
            .with_context(|| format!("Invalid cities_url '{}'", self.cities_url))?;
        Url::parse(&self.weather_url)
            .with_context(|| format!("Invalid weather_url '{}'", self.weather_url))?;

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
