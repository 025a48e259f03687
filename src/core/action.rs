//! Inbound actions and the history record.
//!
//! Humans and bots speak the same vocabulary. Every action is validated by
//! the turn machine before it touches state; see [`crate::game::Game::apply`].
//!
//! ```
//! use rulebound::core::Action;
//! use rulebound::board::Direction;
//! use rulebound::core::TileId;
//!
//! let roll = Action::Roll;
//! assert!(!roll.is_modification());
//!
//! let grow = Action::add_tile(TileId::new(3), Direction::Down);
//! assert!(grow.is_modification());
//! ```

use serde::{Deserialize, Serialize};

use crate::board::{Direction, TileKind};
use crate::rules::Rule;

use super::config::Permission;
use super::ids::{RuleId, TileId};
use super::player::PlayerId;

/// A request from a player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Roll the die and move.
    Roll,

    /// Pick one of the pending destinations by index.
    ChooseDestination { option: usize },

    /// Install a new rule.
    CreateRule { rule: Rule },

    /// Replace the definition of an existing rule, keeping its id.
    UpdateRule { id: RuleId, rule: Rule },

    /// Remove a rule.
    DeleteRule { id: RuleId },

    /// Move a rule to a new declaration index.
    ReorderRule { id: RuleId, index: usize },

    /// Switch a rule on or off without deleting it.
    SetRuleActive { id: RuleId, active: bool },

    /// Grow the board from an existing tile.
    AddTile {
        from: TileId,
        direction: Direction,
        kind: TileKind,
    },

    /// Remove a tile.
    RemoveTile { tile: TileId },

    /// Finish the turn, modifying nothing.
    EndTurn,
}

impl Action {
    /// Add a normal tile (convenience constructor).
    #[must_use]
    pub fn add_tile(from: TileId, direction: Direction) -> Self {
        Action::AddTile {
            from,
            direction,
            kind: TileKind::Normal,
        }
    }

    /// Which permission gates this action, if it is a modification.
    #[must_use]
    pub fn permission(&self) -> Option<Permission> {
        match self {
            Action::CreateRule { .. }
            | Action::UpdateRule { .. }
            | Action::DeleteRule { .. }
            | Action::ReorderRule { .. }
            | Action::SetRuleActive { .. } => Some(Permission::Rule),
            Action::AddTile { .. } | Action::RemoveTile { .. } => Some(Permission::Tile),
            Action::Roll | Action::ChooseDestination { .. } | Action::EndTurn => None,
        }
    }

    /// Whether this action counts as the turn's single modification.
    #[must_use]
    pub fn is_modification(&self) -> bool {
        self.permission().is_some()
    }

    /// Short verb used in log lines and errors.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Action::Roll => "roll",
            Action::ChooseDestination { .. } => "choose a destination",
            Action::CreateRule { .. } => "create a rule",
            Action::UpdateRule { .. } => "update a rule",
            Action::DeleteRule { .. } => "delete a rule",
            Action::ReorderRule { .. } => "reorder a rule",
            Action::SetRuleActive { .. } => "toggle a rule",
            Action::AddTile { .. } => "add a tile",
            Action::RemoveTile { .. } => "remove a tile",
            Action::EndTurn => "end the turn",
        }
    }
}

/// An accepted action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when action was taken.
    pub turn: u32,

    /// Sequence number within the turn (for ordering).
    pub sequence: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32, sequence: u32) -> Self {
        Self {
            player,
            action,
            turn,
            sequence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_of_actions() {
        assert_eq!(Action::Roll.permission(), None);
        assert_eq!(Action::EndTurn.permission(), None);
        assert_eq!(
            Action::DeleteRule { id: RuleId::new(1) }.permission(),
            Some(Permission::Rule)
        );
        assert_eq!(
            Action::RemoveTile { tile: TileId::new(4) }.permission(),
            Some(Permission::Tile)
        );
        assert!(Action::SetRuleActive {
            id: RuleId::new(0),
            active: false
        }
        .is_modification());
    }

    #[test]
    fn test_action_record() {
        let record = ActionRecord::new(PlayerId::new(0), Action::Roll, 3, 5);

        assert_eq!(record.player, PlayerId::new(0));
        assert_eq!(record.action, Action::Roll);
        assert_eq!(record.turn, 3);
        assert_eq!(record.sequence, 5);
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::AddTile {
            from: TileId::new(2),
            direction: Direction::Right,
            kind: TileKind::Special,
        };
        let json = serde_json::to_string(&action).unwrap();
        let deserialized: Action = serde_json::from_str(&json).unwrap();

        assert_eq!(action, deserialized);
    }
}
