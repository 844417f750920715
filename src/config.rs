use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GrasshopperError, Result};
use crate::status::DEFAULT_PROBE_TIMEOUT;
use crate::updater::{DEFAULT_API_BASE, DEFAULT_REPO, DEFAULT_TIMEOUT};

const APP_DIR: &str = "grasshopper";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub update: UpdateConfig,
    pub probe: ProbeConfig,
}

impl Config {
    /// Load config from `explicit_path`, `GRASSHOPPER_CONFIG`, or the per-user
    /// config directory, then apply `GRASSHOPPER_*` environment overrides.
    ///
    /// A missing file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// `Config` when a file exists but is unreadable or invalid TOML, when
    /// an override variable has an unparseable value, or when a timeout is zero.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let path = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("GRASSHOPPER_CONFIG").ok().map(PathBuf::from))
            .or_else(Self::default_path);

        if let Some(path) = path {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch)?;
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok())?;

        Ok(config)
    }

    /// `<config_dir>/grasshopper/config.toml`, if the platform has a config dir.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            GrasshopperError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            GrasshopperError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) -> Result<()> {
        if let Some(patch) = patch.update {
            self.update.merge(patch)?;
        }
        if let Some(patch) = patch.probe {
            self.probe.merge(patch)?;
        }
        Ok(())
    }

    fn apply_overrides(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = env("GRASSHOPPER_UPDATE_AUTO_CHECK") {
            self.update.auto_check = parse_bool(&value);
        }
        if let Some(value) = env("GRASSHOPPER_UPDATE_REPO") {
            self.update.repo = value;
        }
        if let Some(value) = env("GRASSHOPPER_UPDATE_API_BASE") {
            self.update.api_base = value;
        }
        if let Some(value) = env("GRASSHOPPER_UPDATE_TIMEOUT_SECONDS") {
            let key = "GRASSHOPPER_UPDATE_TIMEOUT_SECONDS";
            self.update.timeout_seconds = require_nonzero(key, parse_number(key, &value)?)?;
        }

        if let Some(value) = env("GRASSHOPPER_PROBE_TIMEOUT_MS") {
            let key = "GRASSHOPPER_PROBE_TIMEOUT_MS";
            self.probe.timeout_ms = require_nonzero(key, parse_number(key, &value)?)?;
        }
        if let Some(value) = env("GRASSHOPPER_PROBE_DEFAULT_PORT") {
            self.probe.default_port = parse_number("GRASSHOPPER_PROBE_DEFAULT_PORT", &value)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateConfig {
    /// Check for (and offer) new versions. Turning the prompt off in the
    /// app clears this.
    pub auto_check: bool,
    pub repo: String,
    pub api_base: String,
    /// Must be non-zero.
    pub timeout_seconds: u64,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            auto_check: true,
            repo: DEFAULT_REPO.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl UpdateConfig {
    fn merge(&mut self, patch: UpdatePatch) -> Result<()> {
        if let Some(value) = patch.auto_check {
            self.auto_check = value;
        }
        if let Some(value) = patch.repo {
            self.repo = value;
        }
        if let Some(value) = patch.api_base {
            self.api_base = value;
        }
        if let Some(value) = patch.timeout_seconds {
            self.timeout_seconds = require_nonzero("update.timeout_seconds", value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Must be non-zero.
    pub timeout_ms: u64,
    pub default_port: u16,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: u64::try_from(DEFAULT_PROBE_TIMEOUT.as_millis()).unwrap_or(1000),
            default_port: crate::connection::DEFAULT_SSH_PORT,
        }
    }
}

impl ProbeConfig {
    fn merge(&mut self, patch: ProbePatch) -> Result<()> {
        if let Some(value) = patch.timeout_ms {
            self.timeout_ms = require_nonzero("probe.timeout_ms", value)?;
        }
        if let Some(value) = patch.default_port {
            self.default_port = value;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub update: Option<UpdatePatch>,
    pub probe: Option<ProbePatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct UpdatePatch {
    pub auto_check: Option<bool>,
    pub repo: Option<String>,
    pub api_base: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProbePatch {
    pub timeout_ms: Option<u64>,
    pub default_port: Option<u16>,
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn parse_number<T>(key: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|err| GrasshopperError::Config(format!("invalid {key} value {value}: {err}")))
}

fn require_nonzero(key: &str, value: u64) -> Result<u64> {
    if value == 0 {
        return Err(GrasshopperError::Config(format!("{key} must be greater than 0")));
    }
    Ok(value)
}
