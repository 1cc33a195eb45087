//! Per-pokemon fetch and normalization.
//!
//! The raw records mirror the parts of the API response we read. Every field
//! is optional or defaulted, so absent (or `null`) keys at any depth become
//! empty lists, zeros or `None` instead of errors.

use serde::{Deserialize, Deserializer};

use dex_core::{Ability, BaseStats, PokemonEntry, Sprites};

use crate::{
    DexClient,
    error::ApiError,
    http::{check_response, decode_json},
};

/// Treat an explicit `null` the same as an absent key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct RawPokemon {
    id: Option<u32>,
    name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    types: Vec<RawTypeSlot>,
    #[serde(default, deserialize_with = "null_as_default")]
    abilities: Vec<RawAbilitySlot>,
    #[serde(default, deserialize_with = "null_as_default")]
    stats: Vec<RawStat>,
    sprites: Option<RawSprites>,
    species: Option<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: Option<String>,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTypeSlot {
    #[serde(rename = "type")]
    kind: Option<NamedResource>,
}

#[derive(Debug, Deserialize)]
struct RawAbilitySlot {
    ability: Option<NamedResource>,
    is_hidden: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RawStat {
    stat: Option<NamedResource>,
    base_stat: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawSprites {
    front_default: Option<String>,
    other: Option<RawOtherSprites>,
}

#[derive(Debug, Deserialize)]
struct RawOtherSprites {
    #[serde(rename = "official-artwork")]
    official_artwork: Option<RawArtwork>,
}

#[derive(Debug, Deserialize)]
struct RawArtwork {
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSpecies {
    id: Option<u32>,
}

impl RawPokemon {
    fn species_url(&self) -> Option<&str> {
        self.species
            .as_ref()
            .and_then(|s| s.url.as_deref())
            .filter(|url| !url.is_empty())
    }

    fn into_entry(self, id: u32, dex_id: Option<u32>, placeholder: &str) -> PokemonEntry {
        let types = self
            .types
            .into_iter()
            .filter_map(|slot| slot.kind.and_then(|t| t.name))
            .collect();

        let abilities = self
            .abilities
            .into_iter()
            .filter_map(|slot| {
                let name = slot.ability.and_then(|a| a.name)?;
                Some(Ability {
                    name,
                    is_hidden: slot.is_hidden.unwrap_or(false),
                })
            })
            .collect();

        let mut stats = BaseStats::default();
        for raw in &self.stats {
            if let Some(name) = raw.stat.as_ref().and_then(|s| s.name.as_deref()) {
                stats.set(name, raw.base_stat.unwrap_or(0));
            }
        }

        let sprites = self.sprites.as_ref();
        let artwork = sprites
            .and_then(|s| s.other.as_ref())
            .and_then(|o| o.official_artwork.as_ref())
            .and_then(|a| a.front_default.as_deref());
        let front_default = sprites.and_then(|s| s.front_default.as_deref());

        PokemonEntry {
            id,
            dex_id,
            name: self.name.unwrap_or_default(),
            types,
            abilities,
            stats,
            sprites: Sprites::resolve(artwork, front_default, placeholder),
        }
    }
}

impl DexClient {
    /// Fetch one pokemon by URL and flatten it, with its species number.
    ///
    /// A failed species lookup is logged and leaves `dex_id` as `None`; it
    /// never fails the call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the pokemon request fails or times out, the
    /// API returns a non-success status, the body is malformed, or the
    /// record has no `id`.
    pub async fn fetch_pokemon(&self, url: &str) -> Result<PokemonEntry, ApiError> {
        let resp = check_response(self.http.get(url).send().await?).await?;
        let raw: RawPokemon = decode_json(resp).await?;
        let id = raw.id.ok_or(ApiError::MissingField("id"))?;

        let dex_id = match raw.species_url() {
            Some(species_url) => match self.fetch_species_id(species_url).await {
                Ok(dex_id) => Some(dex_id),
                Err(e) => {
                    tracing::warn!(id, name = ?raw.name, error = %e, "failed to fetch species data");
                    None
                }
            },
            None => {
                tracing::warn!(id, name = ?raw.name, "record has no species URL");
                None
            }
        };

        Ok(raw.into_entry(id, dex_id, &self.placeholder_sprite))
    }

    /// Fetch a species record and return its national dex number.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport, status or parse failure, and
    /// [`ApiError::MissingField`] if the species has no `id`.
    pub async fn fetch_species_id(&self, url: &str) -> Result<u32, ApiError> {
        let resp = check_response(self.http.get(url).send().await?).await?;
        let species: RawSpecies = decode_json(resp).await?;
        species.id.ok_or(ApiError::MissingField("species.id"))
    }
}
