use super::{Phase, Transition};
use crate::engine::{CombatContext, resolve_turn_order};
use crate::error::{CombatError, GameError};
use crate::host::Narration;
use crate::state::ComponentKind;

/// Rolls speed for every committed record and resolves execution order.
///
/// Speed is `d(speed_die_sides) + agility modifier`. A caster without a
/// stats record gets speed 0 without rolling.
pub(super) fn enter(ctx: &mut CombatContext) -> Transition {
    let mut records = ctx.take_committed();
    let sides = ctx.config.speed_die_sides;

    for record in &mut records {
        let speed = match ctx.store.stats(record.caster) {
            Some(stats) => {
                let roll = ctx.rng.roll_die(sides) as i32;
                roll + stats.agility_modifier()
            }
            None => {
                CombatError::missing(record.caster, ComponentKind::Stats).report();
                0
            }
        };
        record.speed = Some(speed);

        let combatant = ctx.label(record.caster);
        ctx.narrate(Narration::SpeedRolled {
            combatant,
            action: record.action.name.clone(),
            speed,
        });
    }

    let resolved = resolve_turn_order(records);
    let order = resolved
        .iter()
        .map(|record| format!("{} {}", ctx.label(record.caster), record.action.name))
        .collect();
    tracing::debug!(actions = resolved.len(), "turn order resolved");
    ctx.narrate(Narration::TurnOrderResolved { order });
    ctx.resolved = resolved;

    Transition::To(Phase::action_execution())
}
