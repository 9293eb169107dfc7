use crate::state::CombatantId;

use super::CombatContext;

/// Result of moving the selection cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAdvance {
    /// Another combatant still has to select.
    Next(CombatantId),
    /// Every combatant has selected; the cursor is back at the start.
    Wrapped,
}

/// Turn-selection cursor methods for CombatContext.
impl CombatContext {
    /// Combatant whose selection sub-turn is current.
    pub fn current_combatant(&self) -> Option<CombatantId> {
        self.roster.get(self.cursor).copied()
    }

    /// True while the cursor sits at the first combatant of the round.
    pub fn is_new_round(&self) -> bool {
        self.cursor == 0
    }

    /// Moves the cursor to the next combatant in turn-selection order.
    ///
    /// Wrapping past the last combatant resets the cursor to zero and
    /// reports [`TurnAdvance::Wrapped`].
    pub fn advance_turn(&mut self) -> TurnAdvance {
        self.cursor += 1;
        match self.roster.get(self.cursor) {
            Some(&next) => TurnAdvance::Next(next),
            None => {
                self.cursor = 0;
                TurnAdvance::Wrapped
            }
        }
    }

    /// Moves the cursor back to the first combatant.
    pub(crate) fn reset_turns(&mut self) {
        self.cursor = 0;
    }
}
