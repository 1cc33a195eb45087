//! # dex-core
//!
//! Core types and dump I/O for dexdump.
//!
//! This crate provides the pieces shared by the fetch pipeline and the
//! standalone sorter:
//! - The normalized [`PokemonEntry`] record and its sub-types
//! - Ordering by numeric id, with id-less records sorted last
//! - Reading and writing the JSON dump artifact
//! - Cross-cutting error types

pub mod dump;
pub mod entry;
pub mod errors;
pub mod ordering;

pub use dump::{read_dump_values, sort_dump_in_place, to_pretty_json, write_dump};
pub use entry::{Ability, BaseStats, PLACEHOLDER_SPRITE, PokemonEntry, Sprites};
pub use errors::DumpError;
pub use ordering::{Identified, sort_by_id};
