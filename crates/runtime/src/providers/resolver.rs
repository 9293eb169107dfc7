use combat_core::{
    ActionRecord, ActionResolver, CombatantId, CombatantStore, Controller, EffectKind, TargetType,
};

/// Applies damage and healing to the store.
///
/// Explicit targets on the record win. Otherwise recipients follow the
/// action's target type: enemy-wide actions hit every standing combatant
/// on the other side, self and ally actions land on the caster. Effects
/// other than damage and healing are logged and ignored.
#[derive(Clone, Debug)]
pub struct EffectResolver {
    roster: Vec<CombatantId>,
}

impl EffectResolver {
    pub fn new(roster: impl Into<Vec<CombatantId>>) -> Self {
        Self {
            roster: roster.into(),
        }
    }

    fn recipients(&self, record: &ActionRecord, store: &dyn CombatantStore) -> Vec<CombatantId> {
        if !record.targets.is_empty() {
            return record.targets.clone();
        }
        match record.action.target {
            TargetType::SelfOnly | TargetType::SingleAlly => vec![record.caster],
            TargetType::AllEnemies => self.opponents(record.caster, store).collect(),
            TargetType::SingleEnemy => self.opponents(record.caster, store).take(1).collect(),
            TargetType::None => Vec::new(),
        }
    }

    fn opponents<'a>(
        &'a self,
        caster: CombatantId,
        store: &'a dyn CombatantStore,
    ) -> impl Iterator<Item = CombatantId> + 'a {
        let caster_is_player = store.controller(caster) == Some(Controller::Player);
        self.roster.iter().copied().filter(move |&id| {
            let is_player = store.controller(id) == Some(Controller::Player);
            is_player != caster_is_player
                && !store.health(id).is_some_and(|health| health.is_defeated())
        })
    }
}

impl ActionResolver for EffectResolver {
    fn resolve(&mut self, record: &ActionRecord, store: &mut dyn CombatantStore) {
        let recipients = self.recipients(record, store);

        for effect in &record.action.effects {
            match effect.kind {
                EffectKind::DealDamage => {
                    for &target in &recipients {
                        if let Some(health) = store.health_mut(target) {
                            health.take_damage(effect.amount);
                            tracing::debug!(%target, amount = effect.amount, remaining = health.current, "damage applied");
                        }
                    }
                }
                EffectKind::Heal => {
                    for &target in &recipients {
                        if let Some(health) = store.health_mut(target) {
                            health.heal(effect.amount);
                            tracing::debug!(%target, amount = effect.amount, current = health.current, "healing applied");
                        }
                    }
                }
                ref other => {
                    tracing::debug!(effect = %other, action = %record.action_id(), "effect has no resolver; ignored");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use combat_core::{
        ActionDefinition, AiIntellect, CombatantRecord, Effect, Health, MemoryStore,
    };

    const HERO: CombatantId = CombatantId(0);
    const GOBLIN: CombatantId = CombatantId(1);
    const ORC: CombatantId = CombatantId(2);

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with(HERO, CombatantRecord::player("Hero").with_health(Health::new(20)))
            .with(
                GOBLIN,
                CombatantRecord::ai("Goblin", AiIntellect::Dumb).with_health(Health::new(6)),
            )
            .with(
                ORC,
                CombatantRecord::ai("Orc", AiIntellect::Dumb).with_health(Health::new(10)),
            )
    }

    fn record(caster: CombatantId, action: ActionDefinition) -> ActionRecord {
        ActionRecord::new(caster, Arc::new(action))
    }

    #[test]
    fn sweeping_attack_hits_every_standing_opponent() {
        let mut store = store();
        let mut resolver = EffectResolver::new([HERO, GOBLIN, ORC]);
        let cleave = ActionDefinition::new("cleave", TargetType::AllEnemies).with_effect(Effect::damage(7));

        resolver.resolve(&record(HERO, cleave), &mut store);

        assert_eq!(store.health(HERO).map(|h| h.current), Some(20));
        assert!(store.health(GOBLIN).is_some_and(|h| h.is_defeated()));
        assert_eq!(store.health(ORC).map(|h| h.current), Some(3));
    }

    #[test]
    fn self_heal_lands_on_the_caster_and_caps_at_max() {
        let mut store = store();
        store.health_mut(HERO).unwrap().take_damage(5);
        let mut resolver = EffectResolver::new([HERO, GOBLIN, ORC]);
        let heal = ActionDefinition::new("heal", TargetType::SelfOnly).with_effect(Effect::heal(9));

        resolver.resolve(&record(HERO, heal), &mut store);

        assert_eq!(store.health(HERO).map(|h| h.current), Some(20));
    }

    #[test]
    fn explicit_targets_win() {
        let mut store = store();
        let mut resolver = EffectResolver::new([HERO, GOBLIN, ORC]);
        let bite = ActionDefinition::new("bite", TargetType::SingleEnemy).with_effect(Effect::damage(3));

        resolver.resolve(&record(GOBLIN, bite).with_targets(vec![HERO]), &mut store);

        assert_eq!(store.health(HERO).map(|h| h.current), Some(17));
    }
}
