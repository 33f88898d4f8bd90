//! Configuration management for Social Sync

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::types::{Account, AccountId, ContentType, Platform};

/// Env var pointing at an alternate config file
pub const CONFIG_ENV: &str = "SOCIALSYNC_CONFIG";
/// Env var carrying the image search access key
pub const SEARCH_KEY_ENV: &str = "SOCIALSYNC_UNSPLASH_KEY";

pub const DEFAULT_SEARCH_URL: &str = "https://api.unsplash.com";
pub const DEFAULT_PAGE_SIZE: usize = 12;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub compose: ComposeSettings,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub accounts: Vec<Account>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeSettings {
    /// Allow submitting a draft with blank text and no images
    #[serde(default = "default_allow_empty")]
    pub allow_empty: bool,
    #[serde(default)]
    pub default_content_type: ContentType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_search_url")]
    pub base_url: String,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_allow_empty() -> bool {
    true
}

fn default_search_url() -> String {
    DEFAULT_SEARCH_URL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ComposeSettings {
    fn default() -> Self {
        Self {
            allow_empty: default_allow_empty(),
            default_content_type: ContentType::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_url(),
            access_key: None,
            page_size: default_page_size(),
        }
    }
}

impl SearchConfig {
    /// Access key from the environment, falling back to the config file
    pub fn resolved_access_key(&self) -> Option<String> {
        std::env::var(SEARCH_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| self.access_key.clone().filter(|key| !key.trim().is_empty()))
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error: the built-in defaults are used.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default_config());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Self {
            compose: ComposeSettings::default(),
            search: SearchConfig::default(),
            accounts: vec![
                sample_account(
                    "ig-1",
                    Platform::Instagram,
                    "Musharof",
                    "/images/user/owner.jpg",
                ),
                sample_account(
                    "tw-1",
                    Platform::Twitter,
                    "Brand Account",
                    "/images/user/user-01.jpg",
                ),
                sample_account(
                    "li-1",
                    Platform::LinkedIn,
                    "Company Page",
                    "/images/user/user-02.jpg",
                ),
            ],
        }
    }

    fn validate(&self) -> Result<()> {
        if self.search.base_url.trim().is_empty() {
            return Err(ConfigError::MissingField("search.base_url".to_string()).into());
        }
        if self.search.page_size == 0 {
            return Err(
                ConfigError::MissingField("search.page_size (must be > 0)".to_string()).into(),
            );
        }
        Ok(())
    }
}

fn sample_account(id: &str, platform: Platform, name: &str, avatar: &str) -> Account {
    Account {
        id: AccountId::from(id),
        platform,
        display_name: name.to_string(),
        avatar_url: avatar.to_string(),
    }
}

/// Resolve the configuration file path under the XDG config directory
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("socialsync").join("config.toml"))
}
