//! The normalized record written to the dump.

use serde::{Deserialize, Serialize};

/// Generic "no sprite" image used when a record carries neither artwork nor a
/// default sprite.
pub const PLACEHOLDER_SPRITE: &str =
    "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/0.png";

/// One pokemon, flattened from its primary record and linked species record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonEntry {
    /// Primary record id. Also the sort key of the dump.
    pub id: u32,
    /// National dex number taken from the species record. `None` when the
    /// species lookup failed.
    pub dex_id: Option<u32>,
    /// API name, e.g. `bulbasaur`.
    pub name: String,
    /// Type names in slot order.
    pub types: Vec<String>,
    /// Abilities in slot order, hidden ones included.
    pub abilities: Vec<Ability>,
    /// Base stats keyed by field.
    pub stats: BaseStats,
    /// Resolved image URLs.
    pub sprites: Sprites,
}

/// One ability slot of a pokemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Ability name, e.g. `overgrow`.
    pub name: String,
    /// Hidden ability slot. `false` when the API leaves it out.
    pub is_hidden: bool,
}

/// The six base stats. Missing stats stay at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    /// `hp`
    pub hp: u32,
    /// `attack`
    pub attack: u32,
    /// `defense`
    pub defense: u32,
    /// `special-attack`
    pub special_attack: u32,
    /// `special-defense`
    pub special_defense: u32,
    /// `speed`
    pub speed: u32,
}

impl BaseStats {
    /// Record `value` under the API stat name (`special-attack`, ...).
    ///
    /// Returns `false` for names that are not one of the six base stats.
    pub fn set(&mut self, api_name: &str, value: u32) -> bool {
        let slot = match api_name {
            "hp" => &mut self.hp,
            "attack" => &mut self.attack,
            "defense" => &mut self.defense,
            "special-attack" => &mut self.special_attack,
            "special-defense" => &mut self.special_defense,
            "speed" => &mut self.speed,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// Image references. Both fields always hold the same resolved URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    /// Default front sprite slot.
    pub front_default: String,
    /// Official artwork slot.
    pub official_artwork: String,
}

impl Sprites {
    /// Pick one image by precedence: official artwork, then the default
    /// sprite, then `placeholder`. Empty strings count as absent.
    #[must_use]
    pub fn resolve(artwork: Option<&str>, front_default: Option<&str>, placeholder: &str) -> Self {
        let chosen = artwork
            .filter(|url| !url.is_empty())
            .or_else(|| front_default.filter(|url| !url.is_empty()))
            .unwrap_or(placeholder);
        Self {
            front_default: chosen.to_string(),
            official_artwork: chosen.to_string(),
        }
    }
}
