//! Batch pipeline configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default number of detail fetches in flight.
const fn default_concurrency() -> usize {
    20
}

/// Emit a progress line every N completions.
const fn default_progress_every() -> usize {
    100
}

fn default_output() -> PathBuf {
    PathBuf::from("data").join("all_pokemon_data.json")
}

fn default_placeholder_sprite() -> String {
    dex_core::PLACEHOLDER_SPRITE.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScrapeConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_progress_every")]
    pub progress_every: usize,

    /// Dump path, relative to the working directory unless absolute.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Image used when a record has neither artwork nor a default sprite.
    #[serde(default = "default_placeholder_sprite")]
    pub placeholder_sprite: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            progress_every: default_progress_every(),
            output: default_output(),
            placeholder_sprite: default_placeholder_sprite(),
        }
    }
}

impl ScrapeConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::invalid("scrape.concurrency", "must be at least 1"));
        }
        if self.progress_every == 0 {
            return Err(ConfigError::invalid("scrape.progress_every", "must be at least 1"));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::invalid("scrape.output", "must not be empty"));
        }
        Ok(())
    }
}
