//! Data-driven combat content.
//!
//! Loaders for the RON/TOML files that feed the engine:
//! - Action and weapon catalogs (RON)
//! - Encounter rosters (RON)
//! - Engine configuration (TOML)
//!
//! Content is read once before an encounter starts and handed to
//! `combat-core` through its oracle traits; the engine never touches files.

pub mod loaders;

pub use loaders::{
    ActionCatalog, CatalogLoader, CombatantSpec, ConfigLoader, ContentFactory, Encounter,
    EncounterLoader, LoadResult, WeaponCatalog,
};
