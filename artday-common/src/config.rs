//! Configuration loading and config file resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "ARTDAY_CONFIG";

const DEFAULT_API_BASE_URL: &str = "https://api.artic.edu/api/v1/";
const DEFAULT_WEB_BASE_URL: &str = "https://www.artic.edu/artworks/";
const DEFAULT_USER_AGENT: &str = "artday/0.1.0 (art-of-the-day viewer)";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5780";

/// Upper bound on artwork ids drawn as candidates.
///
/// Static: newer catalog entries above this bound are never sampled until the
/// value is raised by hand.
pub const DEFAULT_CATALOG_MAX_ID: u32 = 130_000;

/// Attempts per resolution cycle before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// IIIF width recommended by the AIC image service
pub const DEFAULT_TARGET_WIDTH: u32 = 843;

/// How the artwork endpoint is queried for a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    /// `GET artworks/{candidate}`
    #[default]
    ById,
    /// `GET search` over artworks with a random score seeded by the candidate
    Search,
}

/// Logging section of the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset (e.g. "info", "debug")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Service configuration
///
/// Every key is optional in the TOML file; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtdayConfig {
    /// AIC API root, with trailing slash
    pub api_base_url: String,
    /// Public artwork page root; the artwork id is appended
    pub web_base_url: String,
    /// Sent as the `AIC-User-Agent` header
    pub user_agent: String,
    /// N_MAX: candidates are drawn from 1..=catalog_max_id
    pub catalog_max_id: u32,
    /// Attempts per cycle before surfacing the last error
    pub max_attempts: u32,
    /// Canonical IIIF width requested for large images
    pub target_width: u32,
    pub lookup_mode: LookupMode,
    /// HTTP client timeout; unset leaves the transport default in place
    pub request_timeout_secs: Option<u64>,
    /// Listen address for the HTTP service
    pub bind_addr: String,
    pub logging: LoggingConfig,
}

impl Default for ArtdayConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            web_base_url: DEFAULT_WEB_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            catalog_max_id: DEFAULT_CATALOG_MAX_ID,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            target_width: DEFAULT_TARGET_WIDTH,
            lookup_mode: LookupMode::default(),
            request_timeout_secs: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ArtdayConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Read and parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Reading config file {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Reject values the resolver cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(Error::Config("max_attempts must be at least 1".to_string()));
        }
        if self.catalog_max_id == 0 {
            return Err(Error::Config("catalog_max_id must be at least 1".to_string()));
        }
        if self.target_width == 0 {
            return Err(Error::Config("target_width must be at least 1".to_string()));
        }
        if self.api_base_url.trim().is_empty() {
            return Err(Error::Config("api_base_url must not be empty".to_string()));
        }
        if self.web_base_url.trim().is_empty() {
            return Err(Error::Config("web_base_url must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Config file resolution priority:
/// 1. Command-line argument (highest priority, must exist)
/// 2. Environment variable (must exist)
/// 3. User config file, if present
/// 4. None: built-in defaults
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Result<Option<PathBuf>> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return require_existing(path.to_path_buf(), "command line");
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return require_existing(PathBuf::from(path), env_var_name);
        }
    }

    // Priority 3: User config file
    if let Some(path) = default_config_file() {
        if path.exists() {
            return Ok(Some(path));
        }
        debug!("No config file at {}", path.display());
    }

    // Priority 4: compiled defaults
    Ok(None)
}

/// Resolve the config file and load it, falling back to defaults
pub fn load_config(cli_arg: Option<&Path>) -> Result<ArtdayConfig> {
    let config = match resolve_config_path(cli_arg, CONFIG_ENV_VAR)? {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            ArtdayConfig::from_file(&path)?
        }
        None => {
            info!("No config file found, using built-in defaults");
            ArtdayConfig::default()
        }
    };

    config.validate()?;
    Ok(config)
}

fn require_existing(path: PathBuf, source: &str) -> Result<Option<PathBuf>> {
    if path.exists() {
        Ok(Some(path))
    } else {
        Err(Error::Config(format!(
            "Config file from {} not found: {}",
            source,
            path.display()
        )))
    }
}

/// ~/.config/artday/config.toml (platform equivalent elsewhere)
fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("artday").join("config.toml"))
}
