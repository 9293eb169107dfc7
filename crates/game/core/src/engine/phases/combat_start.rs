use super::{Phase, Transition};
use crate::engine::CombatContext;
use crate::error::GameError;
use crate::host::Narration;

/// Builds every deck, fixes turn-selection order and sets the round to one.
///
/// Turn-selection order is the roster order as given; there is no
/// initiative roll. A combatant without a deck record is logged and left
/// deckless, which later yields an empty hand.
pub(super) fn enter(ctx: &mut CombatContext) -> Transition {
    let names: Vec<String> = ctx.roster.iter().map(|&id| ctx.label(id)).collect();
    ctx.narrate(Narration::CombatStarted { combatants: names });

    for id in ctx.roster.clone() {
        match ctx.build_deck(id) {
            Ok(cards) => {
                let combatant = ctx.label(id);
                tracing::debug!(%combatant, cards, "deck built");
                ctx.narrate(Narration::DeckBuilt { combatant, cards });
            }
            Err(error) => error.report(),
        }
    }

    ctx.reset_turns();
    ctx.clear_actions();
    ctx.clear_temporaries();
    ctx.round = 1;

    Transition::To(Phase::action_selection())
}
