#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use combat_core::testing::{
    QueuedInput, RecordingAnimationPlayer, RecordingNarrator, RecordingScene, ResolveWith,
};
use combat_core::{
    ActionDefinition, ActionRecord, CombatConfig, CombatOrchestrator, CombatantId,
    CombatantStore, Collaborators, Effect, EffectKind, MemoryStore, RngOracle, StaticCatalog,
    TargetType, WeaponDefinition,
};

pub const HERO: CombatantId = CombatantId(0);
pub const GOBLIN: CombatantId = CombatantId(1);
pub const ORC: CombatantId = CombatantId(2);

pub const FRAME: Duration = Duration::from_millis(16);

pub fn catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_action(
            ActionDefinition::new("slash", TargetType::SingleEnemy).with_effect(Effect::damage(4)),
        )
        .with_action(
            ActionDefinition::new("fireball", TargetType::SingleEnemy)
                .with_effect(Effect::damage(8)),
        )
        .with_action(ActionDefinition::new("heal", TargetType::SelfOnly).with_effect(Effect::heal(5)))
        .with_action(
            ActionDefinition::new("guard", TargetType::SelfOnly)
                .with_priority(2)
                .with_effect(Effect::new(EffectKind::GainBlock, 3)),
        )
        .with_action(
            ActionDefinition::new("bite", TargetType::SingleEnemy).with_effect(Effect::damage(3)),
        )
        .with_action(
            ActionDefinition::new("pounce", TargetType::SingleEnemy)
                .with_priority(5)
                .with_effect(Effect::damage(3)),
        )
        .with_action(
            ActionDefinition::new("punch", TargetType::SingleEnemy).with_effect(Effect::damage(1)),
        )
        .with_action(
            ActionDefinition::new("sword_strike", TargetType::SingleEnemy)
                .with_effect(Effect::damage(6)),
        )
        .with_weapon(
            WeaponDefinition::new("sword")
                .with_primary_attack("sword_strike")
                .with_granted("guard"),
        )
        .with_weapon(WeaponDefinition::new("unarmed").with_primary_attack("punch"))
}

/// Applies damage to targets and healing to the caster.
pub fn damage_resolver() -> ResolveWith<impl FnMut(&ActionRecord, &mut dyn CombatantStore)> {
    ResolveWith::new(|record: &ActionRecord, store: &mut dyn CombatantStore| {
        for effect in &record.action.effects {
            match effect.kind {
                EffectKind::DealDamage => {
                    for &target in &record.targets {
                        if let Some(health) = store.health_mut(target) {
                            health.take_damage(effect.amount);
                        }
                    }
                }
                EffectKind::Heal => {
                    if let Some(health) = store.health_mut(record.caster) {
                        health.heal(effect.amount);
                    }
                }
                _ => {}
            }
        }
    })
}

pub struct Harness {
    pub combat: CombatOrchestrator,
    pub animation: RecordingAnimationPlayer,
    pub narrator: RecordingNarrator,
    pub input: QueuedInput,
    pub scene: RecordingScene,
}

impl Harness {
    pub fn new(
        store: MemoryStore,
        roster: &[CombatantId],
        config: CombatConfig,
        rng: impl RngOracle + 'static,
    ) -> Self {
        Self::with_animation(store, roster, config, rng, RecordingAnimationPlayer::new())
    }

    pub fn with_animation(
        store: MemoryStore,
        roster: &[CombatantId],
        config: CombatConfig,
        rng: impl RngOracle + 'static,
        animation: RecordingAnimationPlayer,
    ) -> Self {
        let narrator = RecordingNarrator::new();
        let input = QueuedInput::new();
        let scene = RecordingScene::new();

        let collaborators = Collaborators::new(animation.clone(), input.clone(), narrator.clone())
            .with_resolver(damage_resolver())
            .with_scene(scene.clone());

        let combat = CombatOrchestrator::builder()
            .combatants(roster.iter().copied())
            .store(store)
            .catalog(Arc::new(catalog()))
            .collaborators(collaborators)
            .rng(rng)
            .config(config)
            .build()
            .expect("orchestrator assembles");

        Self {
            combat,
            animation,
            narrator,
            input,
            scene,
        }
    }

    pub fn frame(&mut self) {
        self.combat.update(FRAME);
    }

    pub fn advance(&mut self, dt: Duration) {
        self.combat.update(dt);
    }

    /// Releases held animations and runs one frame.
    pub fn release_animations(&mut self) -> usize {
        let completed = self.animation.complete_all();
        self.frame();
        completed
    }
}
