//! Error types.
//!
//! Every failure an inbound action can hit is a recoverable value. A rejected
//! action leaves the game exactly as it was.

use thiserror::Error;

use crate::board::Coord;

use super::config::Permission;
use super::ids::{RuleId, TileId};
use super::player::PlayerId;

/// An action that the turn machine refuses in the current state.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("it is {current}'s turn, not {actor}'s")]
    NotYourTurn { actor: PlayerId, current: PlayerId },

    #[error("cannot {action} during the {phase} phase")]
    WrongPhase {
        action: &'static str,
        phase: &'static str,
    },

    #[error("{0} has already modified the game this turn")]
    AlreadyModified(PlayerId),

    #[error("{0} modifications are disabled for non-host players")]
    PermissionDisabled(Permission),

    #[error("no path choice is pending")]
    NoPendingChoice,

    #[error("path option {option} does not exist ({available} available)")]
    InvalidChoice { option: usize, available: usize },

    #[error("the game is over")]
    GameFinished,

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),
}

/// A board mutation that would break the graph's invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidTileMutation {
    #[error("a tile already exists at {0}")]
    PositionOccupied(Coord),

    #[error("the start tile cannot be removed")]
    IsStartTile,

    #[error("{0} does not exist")]
    UnknownTile(TileId),

    #[error("the board already has a start tile")]
    DuplicateStart,

    #[error("no tile adjacent to {from} at {coord}")]
    NoTileInDirection { from: TileId, coord: Coord },

    #[error("{player} is standing on {tile}")]
    OccupiedByPlayer { tile: TileId, player: PlayerId },

    #[error("tile list is inconsistent: {0}")]
    Inconsistent(String),
}

/// A rule definition that cannot be installed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MalformedRule {
    #[error("rule has no title")]
    MissingTitle,

    #[error("rule has no effects")]
    EmptyEffects,

    #[error("rule references {0}, which is not on the board")]
    UnknownTile(TileId),

    #[error("dice value {value} can never be rolled (range 1..={max})")]
    DiceValueOutOfRange { value: u32, max: u32 },

    #[error("modifier duration must be at least one turn")]
    ZeroDuration,

    #[error("skip-turn count must be at least one")]
    ZeroSkipTurns,
}

/// Umbrella error returned by every inbound action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error(transparent)]
    Illegal(#[from] IllegalAction),

    #[error(transparent)]
    Tile(#[from] InvalidTileMutation),

    #[error(transparent)]
    Rule(#[from] MalformedRule),

    #[error("{0} does not exist")]
    UnknownRule(RuleId),
}

/// Invalid builder input.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("a game needs at least one player")]
    NoPlayers,

    #[error("{count} players requested, at most {max} supported")]
    TooManyPlayers { count: usize, max: usize },

    #[error("a die needs at least one face, got {0}")]
    InvalidDiceSides(u32),

    #[error("host {0} is not seated")]
    HostNotSeated(PlayerId),

    #[error("starting track needs a start and an end tile, got length {0}")]
    TrackTooShort(usize),

    #[error("cascade event budget must be positive")]
    ZeroCascadeBudget,

    #[error("starting rule rejected: {0}")]
    Rule(#[from] MalformedRule),
}

/// Failure to decode or restore a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Codec(#[from] bincode::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid board: {0}")]
    Board(#[from] InvalidTileMutation),

    #[error("invalid rule set: {0}")]
    Rules(#[from] MalformedRule),

    #[error("{player} stands on {tile}, which is not on the board")]
    PlayerOffBoard { player: PlayerId, tile: TileId },

    #[error("snapshot is inconsistent: {0}")]
    Inconsistent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = IllegalAction::NotYourTurn {
            actor: PlayerId::new(1),
            current: PlayerId::new(0),
        };
        assert_eq!(err.to_string(), "it is Player 0's turn, not Player 1's");

        let err = InvalidTileMutation::PositionOccupied(Coord::new(2, -1));
        assert_eq!(err.to_string(), "a tile already exists at (2, -1)");

        let err = MalformedRule::DiceValueOutOfRange { value: 20, max: 14 };
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_action_error_from() {
        let err: ActionError = IllegalAction::GameFinished.into();
        assert_eq!(err, ActionError::Illegal(IllegalAction::GameFinished));
        assert_eq!(err.to_string(), "the game is over");

        let err: ActionError = MalformedRule::MissingTitle.into();
        assert!(matches!(err, ActionError::Rule(MalformedRule::MissingTitle)));
    }
}
