//! Action and weapon catalog loader.

use std::collections::HashSet;
use std::path::Path;

use combat_core::{ActionDefinition, StaticCatalog, WeaponDefinition};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Action catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionCatalog {
    pub actions: Vec<ActionDefinition>,
}

/// Weapon catalog structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponCatalog {
    pub weapons: Vec<WeaponDefinition>,
}

/// Loader for the action/weapon catalog.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Parses an action catalog.
    ///
    /// Definitions without a display name take their id as name.
    pub fn parse_actions(content: &str) -> LoadResult<Vec<ActionDefinition>> {
        let catalog: ActionCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse action catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        let mut actions = Vec::with_capacity(catalog.actions.len());
        for mut action in catalog.actions {
            if !seen.insert(action.id.clone()) {
                anyhow::bail!("Duplicate action id '{}' in action catalog", action.id);
            }
            if action.name.is_empty() {
                action.name = action.id.to_string();
            }
            actions.push(action);
        }
        Ok(actions)
    }

    /// Parses a weapon catalog.
    pub fn parse_weapons(content: &str) -> LoadResult<Vec<WeaponDefinition>> {
        let catalog: WeaponCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse weapon catalog RON: {}", e))?;

        let mut seen = HashSet::new();
        let mut weapons = Vec::with_capacity(catalog.weapons.len());
        for mut weapon in catalog.weapons {
            if !seen.insert(weapon.id.clone()) {
                anyhow::bail!("Duplicate weapon id '{}' in weapon catalog", weapon.id);
            }
            if weapon.name.is_empty() {
                weapon.name = weapon.id.to_string();
            }
            weapons.push(weapon);
        }
        Ok(weapons)
    }

    /// Load and cross-check both catalog files.
    ///
    /// # Arguments
    ///
    /// * `actions_path` - RON file containing an [`ActionCatalog`]
    /// * `weapons_path` - RON file containing a [`WeaponCatalog`]
    pub fn load(actions_path: &Path, weapons_path: &Path) -> LoadResult<StaticCatalog> {
        let actions = Self::parse_actions(&read_file(actions_path)?)?;
        let weapons = Self::parse_weapons(&read_file(weapons_path)?)?;
        Self::assemble(actions, weapons)
    }

    /// Catalog compiled into the crate from `data/`.
    pub fn embedded() -> LoadResult<StaticCatalog> {
        let actions = Self::parse_actions(include_str!("../../data/actions.ron"))?;
        let weapons = Self::parse_weapons(include_str!("../../data/weapons.ron"))?;
        Self::assemble(actions, weapons)
    }

    /// Every action a weapon references must exist.
    fn assemble(
        actions: Vec<ActionDefinition>,
        weapons: Vec<WeaponDefinition>,
    ) -> LoadResult<StaticCatalog> {
        let known: HashSet<_> = actions.iter().map(|action| action.id.clone()).collect();

        for weapon in &weapons {
            let referenced = weapon
                .primary_attack
                .iter()
                .chain(weapon.granted_actions.iter());
            for action in referenced {
                if !known.contains(action) {
                    anyhow::bail!(
                        "Weapon '{}' references unknown action '{}'",
                        weapon.id,
                        action
                    );
                }
            }
        }

        let catalog = StaticCatalog::from_definitions(actions, weapons);
        tracing::debug!(
            actions = catalog.action_count(),
            weapons = catalog.weapon_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}
