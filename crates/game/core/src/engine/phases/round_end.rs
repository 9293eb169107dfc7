use super::{Phase, Transition};
use crate::engine::CombatContext;

/// Discards every hand, drops the round's weapon attacks and decides
/// whether the encounter goes on.
///
/// Defeat is checked before victory, so a round in which both sides fall
/// ends in defeat.
pub(super) fn enter(ctx: &mut CombatContext) -> Transition {
    let discarded = ctx.discard_all_hands();
    ctx.clear_temporaries();
    tracing::debug!(round = ctx.round, discarded, "round closed");

    if ctx.players_defeated() {
        return Transition::To(Phase::CombatDefeat);
    }
    if ctx.enemies_defeated() {
        return Transition::To(Phase::CombatEnd);
    }

    ctx.clear_actions();
    ctx.reset_turns();
    ctx.round += 1;
    Transition::To(Phase::action_selection())
}
