//! Data-driven content definitions and loaders.
//!
//! This crate houses the static Dracula's Castle content and provides
//! loaders for RON/TOML data files:
//! - Castle layouts (data-driven via RON)
//! - Enemy templates (data-driven via RON)
//! - Item catalogs (data-driven via RON)
//! - Game configuration (data-driven via TOML)
//!
//! [`ContentFactory`] bundles the four into a [`Content`] set and turns it
//! into a ready [`castle_core::GameState`]. The built-in castle is compiled
//! into the crate and available through [`ContentFactory::builtin`].
//!
//! All loaders use castle-core types directly with serde for RON/TOML
//! deserialization.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, Content, ContentFactory, EnemyCatalog, EnemyLoader, ItemCatalog, ItemLoader,
    LoadResult, MapLoader,
};
