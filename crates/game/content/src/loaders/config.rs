//! Engine configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for engine configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Fields absent from the file keep their defaults.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CombatConfig> {
        let config: CombatConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        if config.speed_die_sides == 0 {
            anyhow::bail!("speed_die_sides must be at least 1");
        }
        if config.normal_ai_random_percent > 100 {
            anyhow::bail!(
                "normal_ai_random_percent must be within 0..=100, got {}",
                config.normal_ai_random_percent
            );
        }
        if config.max_transitions_per_update == 0 {
            anyhow::bail!("max_transitions_per_update must be at least 1");
        }

        Ok(config)
    }
}
