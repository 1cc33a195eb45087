//! Ordering of dump records by numeric id.

use serde_json::Value;

use crate::entry::PokemonEntry;

/// A record that may carry a numeric id.
pub trait Identified {
    fn numeric_id(&self) -> Option<u64>;
}

impl Identified for PokemonEntry {
    fn numeric_id(&self) -> Option<u64> {
        Some(u64::from(self.id))
    }
}

/// Untyped records loaded from an existing dump. Anything other than a
/// non-negative integer `id` counts as missing.
impl Identified for Value {
    fn numeric_id(&self) -> Option<u64> {
        self.get("id").and_then(Value::as_u64)
    }
}

/// Stable sort ascending by id. Records without an id go after every
/// identified record and keep their relative order.
pub fn sort_by_id<T: Identified>(records: &mut [T]) {
    records.sort_by_key(|record| {
        let id = record.numeric_id();
        (id.is_none(), id.unwrap_or(u64::MAX))
    });
}
