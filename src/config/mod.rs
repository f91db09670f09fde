//! Configuration system (layered: code > env > config file > defaults).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::types::Endpoint;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

pub const BASE_URL_ENV: &str = "VISION_FORM_BASE_URL";
pub const TIMEOUT_ENV: &str = "VISION_FORM_TIMEOUT_SECS";

const CONFIG_FILE_NAME: &str = "vision-form.toml";

/// Where and how to reach the analysis backend.
///
/// There is no timeout by default: a hung request stays in flight until the
/// transport gives up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// On-disk shape of `vision-form.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Resolve config from file and environment.
    ///
    /// An explicit `path` must exist. Without one, the default file under
    /// the user's home directory is read when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        match path {
            Some(path) => config.apply_file(&ConfigFile::read(path)?),
            None => {
                let default_path = default_config_path();
                if default_path.is_file() {
                    config.apply_file(&ConfigFile::read(&default_path)?);
                }
            }
        }

        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Overlay values from a parsed config file.
    pub fn apply_file(&mut self, file: &ConfigFile) {
        if let Some(url) = &file.base_url {
            self.base_url = url.clone();
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Some(Duration::from_secs(secs));
        }
    }

    /// Overlay values from environment variables, read through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                FormError::Configuration(format!("{TIMEOUT_ENV} must be whole seconds, got '{raw}'"))
            })?;
            self.timeout = Some(Duration::from_secs(secs));
        }
        Ok(())
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Check that the base URL is a usable http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let base = self.trimmed_base_url();
        if base.is_empty() {
            return Err(FormError::Configuration(
                "Backend base URL cannot be empty".to_string(),
            ));
        }
        let host = base
            .strip_prefix("http://")
            .or_else(|| base.strip_prefix("https://"))
            .ok_or_else(|| {
                FormError::Configuration(format!(
                    "Backend base URL must start with http:// or https://, got '{base}'"
                ))
            })?;
        if host.is_empty() {
            return Err(FormError::Configuration(format!(
                "Backend base URL has no host: '{base}'"
            )));
        }
        Ok(())
    }

    /// Absolute URL for an endpoint.
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<String> {
        self.validate()?;
        Ok(format!("{}{}", self.trimmed_base_url(), endpoint.path()))
    }

    fn trimmed_base_url(&self) -> &str {
        self.base_url.trim().trim_end_matches('/')
    }
}

impl ConfigFile {
    pub fn read(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw).map_err(|e| match e {
            FormError::Configuration(msg) => {
                FormError::Configuration(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    pub fn parse(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| FormError::Configuration(e.to_string()))
    }
}

/// `~/.vision-form/vision-form.toml`, or a relative fallback without a home.
pub fn default_config_path() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".vision-form"))
        .unwrap_or_else(|| PathBuf::from(".vision-form"))
        .join(CONFIG_FILE_NAME)
}
