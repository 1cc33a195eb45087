//! # dex-config
//!
//! Layered configuration loading for dexdump using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DEXDUMP_*` prefix, `__` as separator)
//! 2. Project-level `.dexdump/config.toml`
//! 3. User-level `~/.config/dexdump/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DEXDUMP_API__BASE_URL` -> `api.base_url`,
//! `DEXDUMP_SCRAPE__CONCURRENCY` -> `scrape.concurrency`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use dex_config::DexConfig;
//!
//! let config = DexConfig::load_with_dotenv().expect("config");
//! println!("fetching from {} with {} workers", config.api.base_url, config.scrape.concurrency);
//! ```

mod api;
mod error;
mod scrape;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use scrape::ScrapeConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DexConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub scrape: ScrapeConfig,
}

impl DexConfig {
    /// Load and validate configuration from TOML files and environment
    /// variables.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env`
    /// support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] if a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file from the current
    /// directory, if one exists.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".dexdump/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("DEXDUMP_").split("__"))
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.scrape.validate()
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dexdump").join("config.toml"))
    }
}
