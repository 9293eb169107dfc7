//! Human-readable progress lines.
//!
//! Narration is purely observational: the engine emits it and never reads
//! it back. Combatants are referred to by their display label so a host can
//! print lines verbatim.

use std::fmt;

use super::AnimationTicket;
use crate::engine::{CombatOutcome, PhaseKind};

/// One narrative event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Narration {
    PhaseEntered {
        phase: PhaseKind,
    },
    CombatStarted {
        combatants: Vec<String>,
    },
    DeckBuilt {
        combatant: String,
        cards: usize,
    },
    RoundStarted {
        round: u32,
    },
    CardsDrawn {
        combatant: String,
        drawn: usize,
        hand: usize,
    },
    HandEmpty {
        combatant: String,
    },
    AwaitingChoice {
        combatant: String,
        choices: Vec<String>,
    },
    ActionChosen {
        combatant: String,
        action: String,
    },
    ChoiceRejected {
        combatant: String,
        action: String,
    },
    TurnForfeited {
        combatant: String,
    },
    TurnSkipped {
        combatant: String,
        reason: String,
    },
    SpeedRolled {
        combatant: String,
        action: String,
        speed: i32,
    },
    TurnOrderResolved {
        order: Vec<String>,
    },
    ActionExecuting {
        combatant: String,
        action: String,
    },
    ActionSkipped {
        combatant: String,
        action: String,
    },
    AnimationTimedOut {
        ticket: AnimationTicket,
    },
    Finished {
        outcome: CombatOutcome,
        round: u32,
    },
}

impl fmt::Display for Narration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PhaseEntered { phase } => write!(f, "-- {phase} --"),
            Self::CombatStarted { combatants } => {
                write!(f, "Combat begins: {}", combatants.join(", "))
            }
            Self::DeckBuilt { combatant, cards } => {
                write!(f, "{combatant} shuffles a deck of {cards} cards")
            }
            Self::RoundStarted { round } => write!(f, "Round {round}"),
            Self::CardsDrawn {
                combatant,
                drawn,
                hand,
            } => write!(f, "{combatant} draws {drawn} (hand: {hand})"),
            Self::HandEmpty { combatant } => {
                write!(f, "{combatant} has nothing to play and passes")
            }
            Self::AwaitingChoice { combatant, choices } => {
                write!(f, "{combatant} considers: {}", choices.join(", "))
            }
            Self::ActionChosen { combatant, action } => {
                write!(f, "{combatant} readies {action}")
            }
            Self::ChoiceRejected { combatant, action } => {
                write!(f, "{combatant} cannot play {action} right now")
            }
            Self::TurnForfeited { combatant } => write!(f, "{combatant} hesitates and loses the turn"),
            Self::TurnSkipped { combatant, reason } => {
                write!(f, "{combatant} skips the turn ({reason})")
            }
            Self::SpeedRolled {
                combatant,
                action,
                speed,
            } => write!(f, "{combatant} rolls {speed} speed for {action}"),
            Self::TurnOrderResolved { order } => write!(f, "Order: {}", order.join(" > ")),
            Self::ActionExecuting { combatant, action } => {
                write!(f, "{combatant} uses {action}")
            }
            Self::ActionSkipped { combatant, action } => {
                write!(f, "{combatant} has fallen; {action} fizzles")
            }
            Self::AnimationTimedOut { ticket } => {
                write!(f, "{ticket} never reported back; moving on")
            }
            Self::Finished { outcome, round } => match outcome {
                CombatOutcome::Victory => write!(f, "Victory after {round} rounds"),
                CombatOutcome::Defeat => write!(f, "Defeat after {round} rounds"),
            },
        }
    }
}

/// Sink for narrative output.
pub trait Narrator {
    fn narrate(&mut self, line: &Narration);
}
