use crate::action::{ActionDefinition, TargetType};
use crate::state::{CombatantId, CombatantStore, Controller};

/// Targets for an AI-chosen action.
///
/// A single-enemy action targets the player-controlled combatant; there is
/// no enemy-versus-enemy targeting. Every other target type attaches no
/// target and is left to the resolver.
pub fn select_targets(
    action: &ActionDefinition,
    roster: &[CombatantId],
    store: &dyn CombatantStore,
) -> Vec<CombatantId> {
    match action.target {
        TargetType::SingleEnemy => roster
            .iter()
            .copied()
            .find(|&id| store.controller(id) == Some(Controller::Player))
            .into_iter()
            .collect(),
        TargetType::AllEnemies
        | TargetType::SingleAlly
        | TargetType::SelfOnly
        | TargetType::None => Vec::new(),
    }
}

/// First non-player combatant in turn-selection order that is still standing.
///
/// Combatants without a health record count as standing.
pub fn first_living_enemy(
    roster: &[CombatantId],
    store: &dyn CombatantStore,
) -> Option<CombatantId> {
    roster.iter().copied().find(|&id| {
        store.controller(id) != Some(Controller::Player)
            && !store.health(id).is_some_and(|health| health.is_defeated())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Effect;
    use crate::state::{AiIntellect, CombatantRecord, Health, MemoryStore};

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with(
                CombatantId(1),
                CombatantRecord::ai("Goblin", AiIntellect::Dumb).with_health(Health::new(0)),
            )
            .with(
                CombatantId(0),
                CombatantRecord::player("Hero").with_health(Health::new(30)),
            )
            .with(
                CombatantId(2),
                CombatantRecord::ai("Orc", AiIntellect::Normal).with_health(Health::new(12)),
            )
    }

    #[test]
    fn single_enemy_targets_the_player() {
        let store = store();
        let roster = [CombatantId(1), CombatantId(0), CombatantId(2)];
        let bite = ActionDefinition::new("bite", TargetType::SingleEnemy).with_effect(Effect::damage(3));
        assert_eq!(select_targets(&bite, &roster, &store), vec![CombatantId(0)]);

        let roar = ActionDefinition::new("roar", TargetType::AllEnemies);
        assert!(select_targets(&roar, &roster, &store).is_empty());
    }

    #[test]
    fn defeated_enemies_are_not_default_targets() {
        let store = store();
        let roster = [CombatantId(1), CombatantId(0), CombatantId(2)];
        assert_eq!(first_living_enemy(&roster, &store), Some(CombatantId(2)));
    }
}
