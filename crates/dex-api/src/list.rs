//! Catalog enumeration.

use crate::{
    DexClient,
    error::ApiError,
    http::{check_response, decode_json},
};

#[derive(serde::Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<ListItem>,
}

#[derive(serde::Deserialize)]
struct ListItem {
    url: Option<String>,
}

impl DexClient {
    /// Fetch the URL of every pokemon, in API order.
    ///
    /// Fails softly: any error is logged and yields an empty list, which
    /// callers treat as "nothing to do".
    pub async fn fetch_pokemon_list(&self) -> Vec<String> {
        match self.try_fetch_pokemon_list().await {
            Ok(urls) => {
                tracing::info!(count = urls.len(), "found pokemon URLs");
                urls
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to fetch pokemon list");
                Vec::new()
            }
        }
    }

    /// Fallible variant of [`Self::fetch_pokemon_list`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or times out, the API
    /// returns a non-success status, or the body is not a list response.
    pub async fn try_fetch_pokemon_list(&self) -> Result<Vec<String>, ApiError> {
        let url = format!("{}/pokemon/?limit={}", self.base_url, self.list_limit);
        tracing::info!(%url, "fetching pokemon list");

        let resp = self.http.get(&url).timeout(self.list_timeout).send().await?;
        let data: ListResponse = decode_json(check_response(resp).await?).await?;

        Ok(data.results.into_iter().filter_map(|item| item.url).collect())
    }
}
