//! Configuration management for acceluav.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::assets::AssetUrls;
use crate::error::{Error, Result};
use crate::pricing::PricingModel;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "acceluav";

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "ACCELUAV_";

/// One year, the cache lifetime for fingerprinted assets.
const DEFAULT_CACHE_MAX_AGE_SECS: u64 = 31_536_000;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `ACCELUAV_`)
/// 2. TOML config file at `~/.config/acceluav/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Asset server configuration.
    pub server: ServerConfig,
    /// Asset URL configuration.
    pub assets: AssetsConfig,
    /// Pricing configuration.
    pub pricing: PricingConfig,
}

/// Asset server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding `3d-model/`, `images/` and the videos.
    pub public_dir: PathBuf,
    /// `max-age` sent in `Cache-Control`.
    pub cache_max_age_secs: u64,
}

/// Asset URL configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Base URL of a remote asset server.
    /// When unset, assets resolve to local `public/` paths.
    pub api_base_url: Option<String>,
}

/// Pricing configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Rate card replacing the reference tiers (JSON or TOML).
    pub rate_card: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 5000,
            public_dir: PathBuf::from("public"),
            cache_max_age_secs: DEFAULT_CACHE_MAX_AGE_SECS,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `ACCELUAV_`)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        debug!(path = %config_file.display(), "Loading configuration");

        let config: Config = Self::sources(&config_file, ENV_PREFIX).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, then the TOML file, then `<prefix>SECTION_KEY` variables.
    fn sources(config_file: &Path, env_prefix: &str) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file).nested())
            .merge(section_env(env_prefix))
    }

    /// Load `path` and the rate card it names, failing on either.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not parse, fails validation, or
    /// names a rate card that cannot be loaded.
    pub fn validate_file(path: &Path) -> Result<Self> {
        let config = Self::load_from(Some(path.to_path_buf()))?;
        config.pricing_model()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::ConfigValidation {
                message: "server.port must be greater than 0".to_string(),
            });
        }

        if self.server.public_dir.as_os_str().is_empty() {
            return Err(Error::ConfigValidation {
                message: "server.public_dir must not be empty".to_string(),
            });
        }

        if let Some(url) = &self.assets.api_base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::ConfigValidation {
                    message: format!("assets.api_base_url must be an http(s) URL: {url}"),
                });
            }
        }

        Ok(())
    }

    /// Get the listen address as `bind:port`.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }

    /// Get the cache lifetime as a Duration.
    #[must_use]
    pub fn cache_max_age(&self) -> Duration {
        Duration::from_secs(self.server.cache_max_age_secs)
    }

    /// Get the asset URL resolver for the configured mode.
    #[must_use]
    pub fn asset_urls(&self) -> AssetUrls {
        match &self.assets.api_base_url {
            Some(base) => AssetUrls::api(base),
            None => AssetUrls::local(),
        }
    }

    /// Get the pricing model, loading the configured rate card if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate card cannot be read or is invalid.
    pub fn pricing_model(&self) -> Result<PricingModel> {
        match &self.pricing.rate_card {
            Some(path) => PricingModel::from_file(path),
            None => Ok(PricingModel::default()),
        }
    }
}

/// Environment provider where only the first `_` separates section from key,
/// so `ACCELUAV_ASSETS_API_BASE_URL` sets `assets.api_base_url`.
fn section_env(prefix: &str) -> Env {
    Env::prefixed(prefix).map(|key| key.as_str().replacen('_', ".", 1).into())
}
