//! Encounter scenarios driven frame by frame through the orchestrator.

mod common;

use std::time::Duration;

use combat_core::testing::{AnimationRequest, RecordingAnimationPlayer, ScriptedRng};
use combat_core::{
    ActionId, AiIntellect, AnimationTicket, CombatConfig, CombatOutcome, CombatantRecord,
    Health, HumanChoice, MemoryStore, Narration, PcgRng, PhaseKind, Stats,
};
use common::{FRAME, GOBLIN, HERO, Harness, ORC};

fn duel(goblin_health: i32) -> MemoryStore {
    MemoryStore::new()
        .with(
            HERO,
            CombatantRecord::player("Hero")
                .with_health(Health::new(20))
                .with_stats(Stats::default())
                .with_persistent(["slash"]),
        )
        .with(
            GOBLIN,
            CombatantRecord::ai("Goblin", AiIntellect::Dumb)
                .with_health(Health::new(goblin_health))
                .with_stats(Stats::default())
                .with_persistent(["bite"]),
        )
}

fn ids(names: &[&str]) -> Vec<ActionId> {
    names.iter().copied().map(ActionId::new).collect()
}

/// Runs the duel up to the point where the hero's slash is being animated.
fn duel_until_execution(config: CombatConfig) -> Harness {
    let mut harness = Harness::new(duel(4), &[HERO, GOBLIN], config, ScriptedRng::new([0]));
    harness.combat.start();
    harness.combat.confirm_choice(HumanChoice::new("slash"));
    assert_eq!(harness.release_animations(), 1);
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionExecution);
    harness
}

/// Scenario: enemies are down when the round closes.
///
/// 1. Hero is offered the drawn hand plus the unarmed weapon attack
/// 2. Hero's slash defaults to the only living enemy
/// 3. Execution kills the goblin, so its own queued bite is skipped
/// 4. RoundEnd sees every enemy defeated and ends the encounter in victory
#[test]
fn enemies_down_at_round_end_ends_in_victory() {
    let mut harness = Harness::new(duel(4), &[HERO, GOBLIN], CombatConfig::default(), ScriptedRng::new([0]));

    // ================================================================
    // Selection: the human is prompted and suspends
    // ================================================================
    harness.combat.start();
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionSelection);
    assert_eq!(harness.combat.round(), 1);

    let prompt = harness.input.last_prompt().expect("hero is prompted");
    assert_eq!(prompt.combatant, HERO);
    assert_eq!(
        prompt.action_ids().cloned().collect::<Vec<_>>(),
        ids(&["slash", "temp_unarmed"])
    );

    harness.combat.confirm_choice(HumanChoice::new("slash"));
    assert_eq!(
        harness.animation.requests(),
        vec![AnimationRequest::Card {
            ticket: AnimationTicket(0),
            caster: HERO,
            action: ActionId::new("slash"),
        }]
    );
    assert!(harness.combat.is_waiting_for_animation());
    assert_eq!(harness.input.withdrawn(), vec![HERO]);

    // ================================================================
    // Card animation completes: goblin decides, speed roll, execution
    // ================================================================
    assert_eq!(harness.release_animations(), 1);
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionExecution);
    assert_eq!(harness.animation.executed(), vec![(HERO, ActionId::new("slash"))]);
    assert_eq!(
        harness.combat.store().health(GOBLIN).map(|health| health.current),
        Some(0)
    );

    let snapshot = harness.combat.snapshot();
    assert_eq!(snapshot.resolved.len(), 2);
    assert_eq!(snapshot.resolved[0].caster, HERO);
    assert_eq!(snapshot.resolved[0].targets, vec![GOBLIN]);
    assert_eq!(snapshot.resolved[1].targets, vec![HERO]);

    // ================================================================
    // Execution completes, pacing elapses, goblin is skipped
    // ================================================================
    assert_eq!(harness.release_animations(), 1);
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionExecution);
    harness.advance(Duration::from_millis(500));

    assert_eq!(harness.combat.phase_kind(), PhaseKind::CombatEnd);
    assert_eq!(harness.combat.outcome(), Some(CombatOutcome::Victory));
    assert_eq!(harness.scene.outcomes(), vec![CombatOutcome::Victory]);
    assert_eq!(harness.animation.executed().len(), 1);
    assert!(harness.narrator.any(|line| matches!(
        line,
        Narration::ActionSkipped { combatant, action } if combatant == "Goblin" && action == "bite"
    )));

    let deck = harness.combat.store().deck(HERO).expect("hero deck");
    assert!(deck.hand().is_empty());
    assert_eq!(deck.discard_len(), 1);

    // Terminal phases ignore further frames.
    harness.frame();
    harness.frame();
    assert_eq!(harness.scene.outcomes().len(), 1);
}

/// Scenario: both sides are down at RoundEnd; defeat is checked first.
/// Speed is the die roll plus the agility modifier; a caster without stats
/// sits at 0 and does not consume a roll.
#[test]
fn speed_roll_adds_agility_and_defaults_statless_casters_to_zero() {
    let store = MemoryStore::new()
        .with(
            HERO,
            CombatantRecord::player("Hero")
                .with_health(Health::new(20))
                .with_stats(Stats {
                    agility: 14,
                    ..Stats::default()
                })
                .with_persistent(["slash"]),
        )
        .with(
            GOBLIN,
            CombatantRecord::ai("Goblin", AiIntellect::Dumb)
                .with_health(Health::new(20))
                .with_persistent(["bite"]),
        );
    let mut harness = Harness::new(store, &[HERO, GOBLIN], CombatConfig::default(), ScriptedRng::new([9]));

    harness.combat.start();
    harness.combat.confirm_choice(HumanChoice::new("slash"));
    assert_eq!(harness.release_animations(), 1);
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionExecution);

    let rolled: Vec<(String, i32)> = harness
        .narrator
        .lines()
        .into_iter()
        .filter_map(|line| match line {
            Narration::SpeedRolled { combatant, speed, .. } => Some((combatant, speed)),
            _ => None,
        })
        .collect();
    // d20 on a raw 9 rolls 10, agility 14 adds 2.
    assert_eq!(rolled, vec![("Hero".to_owned(), 12), ("Goblin".to_owned(), 0)]);

    assert_eq!(harness.animation.executed()[0], (HERO, ActionId::new("slash")));
}

/// A round is announced once, when its first selection sub-turn opens.
#[test]
fn each_round_is_announced_once() {
    let mut harness = Harness::new(duel(20), &[HERO, GOBLIN], CombatConfig::default(), ScriptedRng::new([0]));
    let rounds = |harness: &Harness| -> Vec<u32> {
        harness
            .narrator
            .lines()
            .into_iter()
            .filter_map(|line| match line {
                Narration::RoundStarted { round } => Some(round),
                _ => None,
            })
            .collect()
    };

    harness.combat.start();
    harness.combat.confirm_choice(HumanChoice::new("slash"));
    harness.release_animations();
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionExecution);
    assert_eq!(rounds(&harness), vec![1]);

    for _ in 0..8 {
        if harness.combat.round() == 2 {
            break;
        }
        harness.release_animations();
        harness.advance(Duration::from_millis(600));
    }

    assert_eq!(harness.combat.round(), 2);
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionSelection);
    assert_eq!(harness.input.last_prompt().map(|prompt| prompt.combatant), Some(HERO));
    assert_eq!(rounds(&harness), vec![1, 2]);
}

#[test]
fn defeat_is_checked_before_victory() {
    let store = MemoryStore::new()
        .with(
            HERO,
            CombatantRecord::player("Hero").with_health(Health::new(10).with_current(0)),
        )
        .with(
            GOBLIN,
            CombatantRecord::ai("Goblin", AiIntellect::Dumb).with_health(Health::new(5).with_current(0)),
        );
    let config = CombatConfig::default().with_default_weapon("nothing");
    let mut harness = Harness::new(store, &[HERO, GOBLIN], config, PcgRng::new(1));

    harness.combat.start();

    assert_eq!(harness.combat.phase_kind(), PhaseKind::CombatDefeat);
    assert_eq!(harness.combat.outcome(), Some(CombatOutcome::Defeat));
    assert_eq!(harness.scene.outcomes(), vec![CombatOutcome::Defeat]);
    assert!(harness.animation.requests().is_empty());
    assert_eq!(
        harness
            .narrator
            .count(|line| matches!(line, Narration::HandEmpty { .. })),
        2
    );
}

#[test]
fn fallen_caster_is_skipped_without_animation() {
    let store = MemoryStore::new()
        .with(
            HERO,
            CombatantRecord::player("Hero")
                .with_health(Health::new(3))
                .with_stats(Stats::default())
                .with_persistent(["slash"]),
        )
        .with(
            GOBLIN,
            CombatantRecord::ai("Goblin", AiIntellect::Dumb)
                .with_health(Health::new(20))
                .with_stats(Stats::default())
                .with_persistent(["pounce"]),
        );
    let config = CombatConfig::default().with_default_weapon("nothing");
    let mut harness = Harness::new(store, &[HERO, GOBLIN], config, ScriptedRng::new([0]));

    harness.combat.start();
    harness.combat.confirm_choice(HumanChoice::new("slash"));
    harness.release_animations();

    // The goblin's pounce has higher priority and drops the hero to zero.
    assert_eq!(harness.animation.executed(), vec![(GOBLIN, ActionId::new("pounce"))]);
    harness.release_animations();
    harness.advance(Duration::from_millis(500));

    assert_eq!(harness.animation.executed(), vec![(GOBLIN, ActionId::new("pounce"))]);
    assert!(harness.narrator.any(|line| matches!(
        line,
        Narration::ActionSkipped { combatant, .. } if combatant == "Hero"
    )));
    assert_eq!(harness.combat.outcome(), Some(CombatOutcome::Defeat));
}

#[test]
fn failsafe_synthesizes_missing_completions() {
    let mut harness = Harness::new(duel(4), &[HERO, GOBLIN], CombatConfig::default(), ScriptedRng::new([0]));
    harness.combat.start();
    harness.combat.confirm_choice(HumanChoice::new("slash"));

    // The card animation never reports back.
    harness.animation.drop_pending();
    harness.advance(Duration::from_secs(9));
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionSelection);
    assert!(harness.combat.is_waiting_for_animation());

    harness.advance(Duration::from_secs(1));
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionExecution);

    // Neither does the execution animation.
    harness.animation.drop_pending();
    harness.advance(Duration::from_secs(10));
    assert!(!harness.combat.is_waiting_for_animation());
    harness.advance(Duration::from_millis(500));

    assert_eq!(harness.combat.outcome(), Some(CombatOutcome::Victory));
    assert_eq!(
        harness
            .narrator
            .count(|line| matches!(line, Narration::AnimationTimedOut { .. })),
        2
    );
}

#[test]
fn stale_tickets_are_ignored() {
    let mut harness = duel_until_execution(CombatConfig::default());
    assert!(harness.combat.is_waiting_for_animation());
    assert_eq!(harness.animation.pending_tickets(), vec![AnimationTicket(1)]);

    // Ticket 0 belonged to the card animation of the finished sub-turn.
    harness.combat.complete_animation(AnimationTicket(0));
    harness.frame();
    assert!(harness.combat.is_waiting_for_animation());

    harness.combat.complete_animation(AnimationTicket(1));
    assert!(!harness.combat.is_waiting_for_animation());
}

#[test]
fn invalid_choice_keeps_the_human_idling() {
    let mut harness = Harness::new(duel(4), &[HERO, GOBLIN], CombatConfig::default(), ScriptedRng::new([0]));
    harness.combat.start();

    harness.combat.confirm_choice(HumanChoice::new("fireball"));
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionSelection);
    assert!(harness.combat.context().committed().is_empty());
    assert!(harness.narrator.any(|line| matches!(line, Narration::ChoiceRejected { .. })));
    assert_eq!(
        harness.combat.snapshot().pending_choices,
        ids(&["slash", "temp_unarmed"])
    );

    // Idling costs nothing without a forfeit timer.
    harness.advance(Duration::from_secs(60));
    assert_eq!(harness.combat.snapshot().pending_choices.len(), 2);

    harness
        .combat
        .confirm_choice(HumanChoice::new("temp_unarmed").targeting(GOBLIN));
    let committed = harness.combat.context().committed();
    assert_eq!(committed.len(), 1);
    assert!(committed[0].is_temporary);
    assert_eq!(committed[0].targets, vec![GOBLIN]);
}

#[test]
fn idle_human_forfeits_when_timer_is_configured() {
    let config = CombatConfig::default().with_human_choice_timeout_ms(1_000);
    let mut harness = Harness::new(duel(4), &[HERO, GOBLIN], config, ScriptedRng::new([0]));
    harness.combat.start();

    harness.advance(Duration::from_millis(999));
    assert!(!harness.combat.snapshot().pending_choices.is_empty());

    harness.advance(Duration::from_millis(1));
    assert!(harness.narrator.any(|line| matches!(line, Narration::TurnForfeited { .. })));
    assert_eq!(harness.input.withdrawn(), vec![HERO]);

    let snapshot = harness.combat.snapshot();
    assert_eq!(snapshot.phase, PhaseKind::ActionExecution);
    assert_eq!(snapshot.resolved.len(), 1);
    assert_eq!(snapshot.resolved[0].caster, GOBLIN);
}

#[test]
fn chained_transitions_are_bounded_per_update() {
    let store = MemoryStore::new()
        .with(
            HERO,
            CombatantRecord::player("Hero").with_health(Health::new(10).with_current(0)),
        )
        .with(GOBLIN, CombatantRecord::ai("Goblin", AiIntellect::Dumb));
    let mut config = CombatConfig::default().with_default_weapon("nothing");
    config.max_transitions_per_update = 2;
    let mut harness = Harness::new(store, &[HERO, GOBLIN], config, PcgRng::new(1));

    harness.combat.start();
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionSelection);

    harness.frame();
    assert_eq!(harness.combat.phase_kind(), PhaseKind::ActionExecution);

    harness.frame();
    assert_eq!(harness.combat.phase_kind(), PhaseKind::CombatDefeat);
}

#[test]
fn snapshot_shows_hand_and_weapon_attack() {
    let store = MemoryStore::new()
        .with(
            HERO,
            CombatantRecord::player("Hero")
                .with_health(Health::new(20))
                .with_weapon("sword")
                .with_persistent(["slash"]),
        )
        .with(
            GOBLIN,
            CombatantRecord::ai("Goblin", AiIntellect::Dumb).with_health(Health::new(5)),
        );
    let mut harness = Harness::new(store, &[HERO, GOBLIN], CombatConfig::default(), PcgRng::new(3));
    harness.combat.start();

    let snapshot = harness.combat.snapshot();
    assert_eq!(snapshot.phase, PhaseKind::ActionSelection);
    assert_eq!(snapshot.current_combatant, Some(HERO));

    let mut hand = snapshot.hand.clone();
    hand.sort();
    assert_eq!(hand, ids(&["guard", "slash"]));

    let mut choices = snapshot.pending_choices.clone();
    choices.sort();
    assert_eq!(choices, ids(&["guard", "slash", "temp_sword"]));
    assert_eq!(harness.combat.context().temporary_count(), 1);
}

#[test]
fn seeded_encounters_replay_identically() {
    fn run(seed: u64) -> (Vec<Narration>, Option<CombatOutcome>) {
        let store = MemoryStore::new()
            .with(
                HERO,
                CombatantRecord::player("Hero")
                    .with_health(Health::new(30))
                    .with_stats(Stats::default()),
            )
            .with(
                GOBLIN,
                CombatantRecord::ai("Goblin", AiIntellect::Normal)
                    .with_health(Health::new(12))
                    .with_stats(Stats {
                        agility: 14,
                        ..Stats::default()
                    })
                    .with_persistent(["bite", "heal", "slash"]),
            )
            .with(
                ORC,
                CombatantRecord::ai("Orc", AiIntellect::Dumb)
                    .with_health(Health::new(18))
                    .with_persistent(["fireball", "guard", "heal"]),
            );
        let mut config = CombatConfig::default().with_default_weapon("nothing");
        config.post_action_delay_ms = 0;

        let mut harness = Harness::with_animation(
            store,
            &[HERO, GOBLIN, ORC],
            config,
            PcgRng::new(seed),
            RecordingAnimationPlayer::auto_completing(),
        );
        for _ in 0..400 {
            harness.combat.update(FRAME);
            if harness.combat.is_finished() {
                break;
            }
        }
        (harness.narrator.lines(), harness.combat.outcome())
    }

    let first = run(7);
    let second = run(7);
    assert_eq!(first, second);
    assert_eq!(first.1, Some(CombatOutcome::Defeat));
}
