//! Outbound events.
//!
//! Every accepted action returns the events it caused, in the order they
//! happened. A front-end can render the game from these alone.

use serde::{Deserialize, Serialize};

use crate::board::{Coord, TileKind};
use crate::core::{Permission, PlayerId, RuleId, TileId};
use crate::effects::{EffectKind, LedgerOutcome, Modifier};
use crate::rules::RuleBranch;

/// Something that happened in the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Final roll value, modifiers included.
    DiceRolled { player: PlayerId, value: u32 },

    /// Several destinations are reachable; the player must pick one.
    PathChoiceRequired {
        player: PlayerId,
        options: Vec<TileId>,
    },

    /// No walk of the rolled length exists.
    NoLegalMove { player: PlayerId, roll: u32 },

    PlayerMoved {
        player: PlayerId,
        from: TileId,
        to: TileId,
        /// Every tile of the walk, `from` and `to` included.
        path: Vec<TileId>,
    },

    ScoreChanged {
        player: PlayerId,
        delta: i64,
        /// Score after the change.
        score: i64,
    },

    RuleTriggered {
        rule: RuleId,
        player: PlayerId,
        branch: RuleBranch,
    },

    /// A modifier entered or refreshed the ledger.
    EffectApplied {
        rule: Option<RuleId>,
        player: PlayerId,
        modifier: Modifier,
        duration: u32,
        outcome: LedgerOutcome,
    },

    /// A shield stopped a harmful effect.
    EffectBlocked {
        rule: Option<RuleId>,
        player: PlayerId,
        effect: EffectKind,
    },

    EffectExpired { player: PlayerId, modifier: Modifier },

    RuleAdded {
        rule: RuleId,
        author: Option<PlayerId>,
    },
    RuleUpdated { rule: RuleId },
    RuleDeleted { rule: RuleId },
    RuleReordered { rule: RuleId, index: usize },
    RuleToggled { rule: RuleId, active: bool },

    TileAdded {
        tile: TileId,
        coord: Coord,
        kind: TileKind,
        from: TileId,
    },
    TileRemoved { tile: TileId },

    PermissionChanged {
        permission: Permission,
        allowed: bool,
    },

    /// A player's turn was passed over; `remaining` skips are still owed.
    TurnSkipped { player: PlayerId, remaining: u32 },

    /// `player` is now to act on turn `turn`.
    TurnAdvanced { player: PlayerId, turn: u32 },

    GameOver { winner: PlayerId },
}

impl GameEvent {
    /// The player the event is about, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::DiceRolled { player, .. }
            | GameEvent::PathChoiceRequired { player, .. }
            | GameEvent::NoLegalMove { player, .. }
            | GameEvent::PlayerMoved { player, .. }
            | GameEvent::ScoreChanged { player, .. }
            | GameEvent::RuleTriggered { player, .. }
            | GameEvent::EffectApplied { player, .. }
            | GameEvent::EffectBlocked { player, .. }
            | GameEvent::EffectExpired { player, .. }
            | GameEvent::TurnSkipped { player, .. }
            | GameEvent::TurnAdvanced { player, .. } => Some(*player),
            GameEvent::GameOver { winner } => Some(*winner),
            GameEvent::RuleAdded { author, .. } => *author,
            GameEvent::RuleUpdated { .. }
            | GameEvent::RuleDeleted { .. }
            | GameEvent::RuleReordered { .. }
            | GameEvent::RuleToggled { .. }
            | GameEvent::TileAdded { .. }
            | GameEvent::TileRemoved { .. }
            | GameEvent::PermissionChanged { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_player() {
        let moved = GameEvent::PlayerMoved {
            player: PlayerId::new(2),
            from: TileId::new(0),
            to: TileId::new(1),
            path: vec![TileId::new(0), TileId::new(1)],
        };
        assert_eq!(moved.player(), Some(PlayerId::new(2)));
        assert_eq!(GameEvent::TileRemoved { tile: TileId::new(3) }.player(), None);
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::EffectApplied {
            rule: Some(RuleId::new(4)),
            player: PlayerId::new(1),
            modifier: Modifier::DiceMin { value: 3 },
            duration: 2,
            outcome: LedgerOutcome::Added,
        };
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
