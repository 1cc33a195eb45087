//! PokeAPI client configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "https://pokeapi.co/api/v2".to_string()
}

fn default_user_agent() -> String {
    format!("dexdump/{}", env!("CARGO_PKG_VERSION"))
}

/// Page size for the list request, large enough to cover the whole catalog.
const fn default_list_limit() -> u32 {
    10_000
}

const fn default_list_timeout_secs() -> u64 {
    30
}

const fn default_detail_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiConfig {
    /// API root without a trailing slash. The list endpoint is
    /// `{base_url}/pokemon/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_list_limit")]
    pub list_limit: u32,

    /// Timeout for the single list request, in seconds.
    #[serde(default = "default_list_timeout_secs")]
    pub list_timeout_secs: u64,

    /// Timeout for each pokemon and species request, in seconds.
    #[serde(default = "default_detail_timeout_secs")]
    pub detail_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            list_limit: default_list_limit(),
            list_timeout_secs: default_list_timeout_secs(),
            detail_timeout_secs: default_detail_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::invalid("api.base_url", "must not be empty"));
        }
        if self.list_limit == 0 {
            return Err(ConfigError::invalid("api.list_limit", "must be at least 1"));
        }
        if self.list_timeout_secs == 0 {
            return Err(ConfigError::invalid("api.list_timeout_secs", "must be at least 1"));
        }
        if self.detail_timeout_secs == 0 {
            return Err(ConfigError::invalid("api.detail_timeout_secs", "must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://pokeapi.co/api/v2");
        assert!(config.user_agent.starts_with("dexdump/"));
        assert_eq!(config.list_timeout_secs, 30);
        assert_eq!(config.detail_timeout_secs, 10);
    }

    #[test]
    fn rejects_zero_timeout() {
        let config = ApiConfig {
            detail_timeout_secs: 0,
            ..ApiConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("api.detail_timeout_secs"));
    }

    #[test]
    fn rejects_blank_base_url() {
        let config = ApiConfig {
            base_url: "  ".to_string(),
            ..ApiConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
