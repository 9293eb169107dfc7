use super::Transition;
use crate::engine::{CombatContext, CombatOutcome};

pub(super) fn enter_defeat(ctx: &mut CombatContext) -> Transition {
    ctx.finish(CombatOutcome::Defeat);
    Transition::Stay
}

pub(super) fn enter_victory(ctx: &mut CombatContext) -> Transition {
    ctx.finish(CombatOutcome::Victory);
    Transition::Stay
}
