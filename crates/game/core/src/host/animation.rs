use std::fmt;

use tokio::sync::mpsc::UnboundedSender;

use crate::action::{ActionDefinition, ActionRecord};
use crate::state::CombatantId;

/// Identifies one animation request. Tickets increase monotonically over
/// the whole encounter, so a completion can always be matched to the
/// request that caused it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AnimationTicket(pub u64);

impl fmt::Display for AnimationTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "anim#{}", self.0)
    }
}

/// Handle an animation player uses to report that a request finished.
///
/// The receiving end belongs to the phase that issued the request and is
/// dropped when that phase exits, so completing a stale handle is harmless.
#[derive(Clone, Debug)]
pub struct AnimationCompletion {
    ticket: AnimationTicket,
    sender: UnboundedSender<AnimationTicket>,
}

impl AnimationCompletion {
    pub(crate) fn new(ticket: AnimationTicket, sender: UnboundedSender<AnimationTicket>) -> Self {
        Self { ticket, sender }
    }

    pub fn ticket(&self) -> AnimationTicket {
        self.ticket
    }

    /// Reports completion. Returns false if the requesting phase has
    /// already moved on.
    pub fn complete(self) -> bool {
        self.sender.send(self.ticket).is_ok()
    }

    /// True while the requesting phase is still listening.
    pub fn is_listening(&self) -> bool {
        !self.sender.is_closed()
    }
}

/// Black-box animation playback.
///
/// Requests return immediately; the player reports completion later,
/// either through the [`AnimationCompletion`] handle or by pushing
/// [`crate::engine::CombatEvent::AnimationComplete`] into the orchestrator.
pub trait AnimationPlayer {
    /// Plays the execution animation of a committed action.
    fn play_action(&mut self, record: &ActionRecord, completion: AnimationCompletion);

    /// Plays the card-confirmation animation of a human's choice.
    fn play_card(
        &mut self,
        caster: CombatantId,
        action: &ActionDefinition,
        completion: AnimationCompletion,
    );
}
