//! Content loaders for reading combat data from files.
//!
//! Each loader turns one RON/TOML file into the core type the engine
//! consumes. [`ContentFactory`] ties them to a data directory.

pub mod catalog;
pub mod config;
pub mod encounter;
pub mod factory;

pub use catalog::{ActionCatalog, CatalogLoader, WeaponCatalog};
pub use config::ConfigLoader;
pub use encounter::{CombatantSpec, Encounter, EncounterLoader};
pub use factory::ContentFactory;

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file {}", path.display()))
}
