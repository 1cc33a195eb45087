//! # dex-api
//!
//! PokeAPI HTTP client for dexdump.
//!
//! - [`DexClient::fetch_pokemon_list`] enumerates every pokemon URL in one
//!   request.
//! - [`DexClient::fetch_pokemon`] fetches one pokemon plus its species record
//!   and flattens them into a [`dex_core::PokemonEntry`].
//! - [`Dispatcher`] runs a task per URL with bounded concurrency, isolating
//!   failures and panics per task.
//! - [`DexClient::fetch_all`] ties the last two together.

pub mod detail;
pub mod dispatch;
pub mod list;

mod error;
mod http;

pub use dispatch::{BatchOutcome, BatchSummary, Dispatcher, Progress};
pub use error::ApiError;

use std::sync::Arc;
use std::time::Duration;

use dex_config::ApiConfig;
use dex_core::PokemonEntry;

/// HTTP client for PokeAPI. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct DexClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    list_limit: u32,
    list_timeout: Duration,
    placeholder_sprite: Arc<str>,
}

impl DexClient {
    /// Build a client from the `[api]` config section.
    ///
    /// `placeholder_sprite` is the image used for records without any sprite.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` fails
    /// to build (e.g. TLS backend initialization).
    pub fn new(config: &ApiConfig, placeholder_sprite: &str) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.detail_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: Arc::from(config.base_url.trim_end_matches('/')),
            list_limit: config.list_limit,
            list_timeout: Duration::from_secs(config.list_timeout_secs),
            placeholder_sprite: Arc::from(placeholder_sprite),
        })
    }

    /// Fetch every URL through `dispatcher`. Failed URLs are logged and left
    /// out of the result.
    pub async fn fetch_all(
        &self,
        urls: Vec<String>,
        dispatcher: &Dispatcher,
    ) -> BatchOutcome<PokemonEntry> {
        dispatcher
            .run(urls, |url| {
                let client = self.clone();
                async move { client.fetch_pokemon(&url).await }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_from_default_config() {
        let client = DexClient::new(&ApiConfig::default(), dex_core::PLACEHOLDER_SPRITE).unwrap();
        assert_eq!(&*client.base_url, "https://pokeapi.co/api/v2");
        assert_eq!(client.list_timeout, Duration::from_secs(30));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = ApiConfig {
            base_url: "http://localhost:1234/api/v2/".to_string(),
            ..ApiConfig::default()
        };
        let client = DexClient::new(&config, dex_core::PLACEHOLDER_SPRITE).unwrap();
        assert_eq!(&*client.base_url, "http://localhost:1234/api/v2");
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_fetch_first_pokemon() {
        let client = DexClient::new(&ApiConfig::default(), dex_core::PLACEHOLDER_SPRITE).unwrap();
        let entry = client
            .fetch_pokemon("https://pokeapi.co/api/v2/pokemon/1/")
            .await
            .unwrap();
        println!("{entry:#?}");
        assert_eq!(entry.id, 1);
        assert_eq!(entry.dex_id, Some(1));
        assert_eq!(entry.name, "bulbasaur");
    }
}
