//! Content factory for loading an encounter's content from a data directory.

use std::path::{Path, PathBuf};

use anyhow::Context;
use combat_core::{CombatConfig, StaticCatalog};

use crate::loaders::{CatalogLoader, ConfigLoader, Encounter, EncounterLoader, LoadResult};

/// Content factory that loads combat content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── actions.ron
/// ├── weapons.ron
/// └── encounters/
///     ├── goblin_ambush.ron
///     └── orc_warband.ron
/// ```
#[derive(Debug, Clone)]
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the `data/` directory shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
    }

    /// Load engine configuration from `config.toml`.
    ///
    /// A missing file yields the default configuration.
    pub fn load_config(&self) -> LoadResult<CombatConfig> {
        let path = self.data_dir.join("config.toml");
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config.toml; using defaults");
            return Ok(CombatConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load the action/weapon catalog from `actions.ron` and `weapons.ron`.
    pub fn load_catalog(&self) -> LoadResult<StaticCatalog> {
        CatalogLoader::load(
            &self.data_dir.join("actions.ron"),
            &self.data_dir.join("weapons.ron"),
        )
    }

    /// Load `encounters/{name}.ron` and check it against `catalog`.
    pub fn load_encounter(&self, name: &str, catalog: &StaticCatalog) -> LoadResult<Encounter> {
        let path = self.data_dir.join("encounters").join(format!("{}.ron", name));
        let encounter = EncounterLoader::load(&path)?;
        encounter
            .validate(catalog)
            .with_context(|| format!("Invalid encounter {}", path.display()))?;
        Ok(encounter)
    }

    /// Names of every encounter file, sorted.
    pub fn encounter_names(&self) -> LoadResult<Vec<String>> {
        let dir = self.data_dir.join("encounters");
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to list encounters in {}", dir.display()))?;

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "ron") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    names.push(stem.to_owned());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_loads() {
        let factory = ContentFactory::bundled();
        let catalog = factory.load_catalog().expect("catalog");
        let config = factory.load_config().expect("config");
        assert!(config.hand_size > 0);

        let names = factory.encounter_names().expect("encounters");
        assert!(names.contains(&"goblin_ambush".to_owned()));
        for name in names {
            factory
                .load_encounter(&name, &catalog)
                .unwrap_or_else(|e| panic!("{name}: {e:#}"));
        }
    }
}
