//! Turn phases and the turn cursor.

use serde::{Deserialize, Serialize};

use crate::board::Path;
use crate::core::PlayerId;

/// Where the current turn stands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the current player to roll.
    Roll,
    /// The roll reached several destinations; the current player picks one.
    ChoosePath { options: Vec<Path> },
    /// Movement is over; one modification or an end of turn is allowed.
    Modify,
    /// A rule declared a winner. Terminal.
    Finished { winner: PlayerId },
}

impl Phase {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Roll => "roll",
            Phase::ChoosePath { .. } => "choose path",
            Phase::Modify => "modify",
            Phase::Finished { .. } => "finished",
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Finished { .. })
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Whose turn it is and how far it has progressed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCursor {
    pub current: PlayerId,
    pub phase: Phase,
    /// Final value of this turn's roll, once rolled.
    pub last_dice: Option<u32>,
    /// Modifications performed this turn.
    pub modifications: u32,
    /// Starts at 1 and counts every turn taken, extra turns included.
    pub turn_number: u32,
    /// Accepted actions this turn, for the history record.
    pub sequence: u32,
}

impl TurnCursor {
    /// The cursor at the start of a game.
    #[must_use]
    pub fn new(first: PlayerId) -> Self {
        Self {
            current: first,
            phase: Phase::Roll,
            last_dice: None,
            modifications: 0,
            turn_number: 1,
            sequence: 0,
        }
    }

    /// Hand the turn to `player`, resetting every per-turn field.
    pub fn begin_turn(&mut self, player: PlayerId) {
        self.current = player;
        self.phase = Phase::Roll;
        self.last_dice = None;
        self.modifications = 0;
        self.turn_number += 1;
        self.sequence = 0;
    }

    /// Get the next action sequence number and increment.
    pub fn next_sequence(&mut self) -> u32 {
        let seq = self.sequence;
        self.sequence += 1;
        seq
    }

    /// Pending destination options, if a choice is outstanding.
    #[must_use]
    pub fn pending_choice(&self) -> Option<&[Path]> {
        match &self.phase {
            Phase::ChoosePath { options } => Some(options),
            _ => None,
        }
    }
}
