//! Encounter roster loader.
//!
//! An encounter lists its combatants in turn-selection order. Each entry
//! becomes one [`CombatantRecord`]; ids are assigned by position.

use std::path::Path;

use combat_core::{
    ActionId, AiIntellect, CatalogOracle, CombatantId, CombatantRecord, Controller, Health,
    MemoryStore, Stats, WeaponId,
};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One combatant entry in an encounter file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub controller: Controller,
    #[serde(default)]
    pub intellect: Option<AiIntellect>,
    /// Maximum hit points; the combatant starts at full health.
    #[serde(default)]
    pub health: Option<i32>,
    #[serde(default)]
    pub stats: Option<Stats>,
    #[serde(default)]
    pub weapon: Option<WeaponId>,
    #[serde(default)]
    pub persistent: Vec<ActionId>,
    #[serde(default)]
    pub innate: Vec<ActionId>,
}

impl CombatantSpec {
    fn to_record(&self) -> CombatantRecord {
        let mut record = CombatantRecord::new(self.name.clone()).with_controller(self.controller);
        record.intellect = self.intellect;
        record.health = self.health.map(Health::new);
        record.stats = self.stats;
        if let Some(weapon) = &self.weapon {
            record = record.with_weapon(weapon.clone());
        }
        record
            .with_persistent(self.persistent.iter().cloned())
            .with_innate(self.innate.iter().cloned())
    }
}

/// A complete encounter roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub name: String,
    pub combatants: Vec<CombatantSpec>,
}

impl Encounter {
    /// Turn-selection order of the roster.
    pub fn roster(&self) -> Vec<CombatantId> {
        (0..self.combatants.len() as u32).map(CombatantId).collect()
    }

    /// Builds the entity store, keyed by [`Encounter::roster`] ids.
    pub fn to_store(&self) -> MemoryStore {
        self.roster()
            .into_iter()
            .zip(&self.combatants)
            .fold(MemoryStore::new(), |store, (id, spec)| {
                store.with(id, spec.to_record())
            })
    }

    /// Checks the roster against a catalog.
    ///
    /// Every named weapon and action must exist, AI combatants need an
    /// intellect tier and at least one side must be player-controlled.
    pub fn validate(&self, catalog: &dyn CatalogOracle) -> LoadResult<()> {
        if self.combatants.is_empty() {
            anyhow::bail!("Encounter '{}' has no combatants", self.name);
        }

        for spec in &self.combatants {
            if spec.controller == Controller::Ai && spec.intellect.is_none() {
                anyhow::bail!("AI combatant '{}' has no intellect tier", spec.name);
            }
            if let Some(weapon) = &spec.weapon {
                if catalog.weapon(weapon).is_none() {
                    anyhow::bail!("Combatant '{}' wields unknown weapon '{}'", spec.name, weapon);
                }
            }
            for action in spec.persistent.iter().chain(&spec.innate) {
                if catalog.action(action).is_none() {
                    anyhow::bail!("Combatant '{}' knows unknown action '{}'", spec.name, action);
                }
            }
        }

        if !self
            .combatants
            .iter()
            .any(|spec| spec.controller == Controller::Player)
        {
            tracing::warn!(encounter = %self.name, "encounter has no player-controlled combatant");
        }
        Ok(())
    }
}

/// Loader for encounter rosters from RON files.
pub struct EncounterLoader;

impl EncounterLoader {
    pub fn load(path: &Path) -> LoadResult<Encounter> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Encounter> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse encounter RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{CombatantStore, StaticCatalog};

    const SKIRMISH: &str = r#"(
        name: "Skirmish",
        combatants: [
            (
                name: "Hero",
                controller: Player,
                health: Some(30),
                stats: Some((agility: 14)),
                weapon: Some("sword"),
                persistent: ["slash"],
            ),
            (
                name: "Goblin",
                controller: Ai,
                intellect: Some(Normal),
                health: Some(12),
                innate: ["bite"],
            ),
        ],
    )"#;

    #[test]
    fn roster_follows_file_order() {
        let encounter = EncounterLoader::parse(SKIRMISH).unwrap();
        let store = encounter.to_store();

        assert_eq!(encounter.roster(), vec![CombatantId(0), CombatantId(1)]);
        assert_eq!(store.name(CombatantId(0)), Some("Hero"));
        assert_eq!(store.controller(CombatantId(1)), Some(Controller::Ai));
        assert_eq!(store.intellect(CombatantId(1)), Some(AiIntellect::Normal));
        assert_eq!(store.health(CombatantId(1)).map(|h| h.current), Some(12));
    }

    #[test]
    fn partial_stats_default_the_rest() {
        let encounter = EncounterLoader::parse(SKIRMISH).unwrap();
        let stats = encounter.to_store().stats(CombatantId(0)).unwrap();

        assert_eq!(stats.agility, 14);
        assert_eq!(stats.strength, Stats::BASELINE);
        assert_eq!(stats.agility_modifier(), 2);
    }

    #[test]
    fn validation_catches_unknown_content() {
        let encounter = EncounterLoader::parse(SKIRMISH).unwrap();
        let error = encounter.validate(&StaticCatalog::new()).unwrap_err();
        assert!(error.to_string().contains("sword"));
    }

    #[test]
    fn ai_without_intellect_is_invalid() {
        let encounter = EncounterLoader::parse(
            r#"(name: "Broken", combatants: [(name: "Golem", controller: Ai)])"#,
        )
        .unwrap();
        assert!(encounter.validate(&StaticCatalog::new()).is_err());
    }
}
