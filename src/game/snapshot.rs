//! Persistence boundary.
//!
//! A [`GameSnapshot`] is a plain, serde-friendly copy of everything needed
//! to resume a game: configuration, tiles, roster, rules, the turn cursor,
//! permissions, ledger entries, the last effect, history and the RNG state.
//! Restoring validates the board, the roster and the turn cursor before
//! handing back a [`Game`].

use serde::{Deserialize, Serialize};

use crate::board::{BoardGraph, Tile};
use crate::core::{
    ActionRecord, GameConfig, GameRng, GameRngState, GameState, Permissions, Player, PlayerMap,
    SnapshotError,
};
use crate::effects::{EffectLedger, LastEffect, TemporaryEffect};
use crate::rules::{Rule, RuleEngine};
use crate::turn::{Phase, TurnCursor};

use super::session::Game;

/// Serializable image of a game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub config: GameConfig,
    /// Tiles in id order.
    pub tiles: Vec<Tile>,
    pub next_tile_id: u32,
    /// Players in seat order.
    pub players: Vec<Player>,
    /// Rules in declaration order.
    pub rules: Vec<Rule>,
    pub next_rule_id: u32,
    pub cursor: TurnCursor,
    pub permissions: Permissions,
    /// Ledger entries per seat.
    pub ledger: Vec<Vec<TemporaryEffect>>,
    pub last_effect: Option<LastEffect>,
    pub history: Vec<ActionRecord>,
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode with bincode. The result is not validated until restored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Game {
    /// Capture the whole game.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        let state = &self.state;
        GameSnapshot {
            config: state.config.clone(),
            tiles: state.board.tiles().into_iter().cloned().collect(),
            next_tile_id: state.board.next_tile_id(),
            players: state.players.values().cloned().collect(),
            rules: self.rules.iter().cloned().collect(),
            next_rule_id: self.rules.next_id(),
            cursor: state.cursor.clone(),
            permissions: state.permissions,
            ledger: state.ledger.entries().values().cloned().collect(),
            last_effect: state.last_effect,
            history: state.history.iter().cloned().collect(),
            rng: self.rng.state(),
        }
    }

    /// Rebuild a game from a snapshot, validating it first.
    pub fn restore(snapshot: GameSnapshot) -> Result<Game, SnapshotError> {
        let GameSnapshot {
            config,
            tiles,
            next_tile_id,
            players,
            rules,
            next_rule_id,
            cursor,
            permissions,
            ledger,
            last_effect,
            history,
            rng,
        } = snapshot;

        config.validate(players.len())?;
        let board = BoardGraph::from_parts(tiles, next_tile_id)?;

        for (seat, player) in players.iter().enumerate() {
            if player.id.index() != seat {
                return Err(SnapshotError::Inconsistent(format!(
                    "{} sits in seat {seat}",
                    player.id
                )));
            }
            if !board.contains(player.position) {
                return Err(SnapshotError::PlayerOffBoard {
                    player: player.id,
                    tile: player.position,
                });
            }
        }
        if ledger.len() != players.len() {
            return Err(SnapshotError::Inconsistent(format!(
                "{} ledger rows for {} players",
                ledger.len(),
                players.len()
            )));
        }
        if cursor.current.index() >= players.len() {
            return Err(SnapshotError::Inconsistent(format!(
                "{} is not seated",
                cursor.current
            )));
        }
        check_phase(&cursor, &board, &players)?;

        let mut seen = Vec::with_capacity(rules.len());
        for rule in &rules {
            if rule.id.raw() == 0 || rule.id.raw() >= next_rule_id || seen.contains(&rule.id) {
                return Err(SnapshotError::Inconsistent(format!(
                    "bad rule id {}",
                    rule.id
                )));
            }
            seen.push(rule.id);
        }
        let engine = RuleEngine::from_parts(rules, next_rule_id)?;

        let policy = config.stacking;
        let mut state = GameState::from_parts(config, board, PlayerMap::from_vec(players));
        state.ledger = EffectLedger::from_entries(PlayerMap::from_vec(ledger), policy);
        state.cursor = cursor;
        state.permissions = permissions;
        state.last_effect = last_effect;
        state.history = history.into_iter().collect();

        Ok(Game::from_parts(state, engine, GameRng::from_state(&rng)))
    }
}

/// A pending choice must hold walks the current player can take on this
/// board, and a finished game must name a seated winner.
fn check_phase(
    cursor: &TurnCursor,
    board: &BoardGraph,
    players: &[Player],
) -> Result<(), SnapshotError> {
    match &cursor.phase {
        Phase::ChoosePath { options } => {
            if options.is_empty() {
                return Err(SnapshotError::Inconsistent(
                    "path choice without options".to_string(),
                ));
            }
            let position = players[cursor.current.index()].position;
            for (i, option) in options.iter().enumerate() {
                if option.start() != position {
                    return Err(SnapshotError::Inconsistent(format!(
                        "option {i} starts on {} instead of {position}",
                        option.start()
                    )));
                }
                let linked = option.tiles().windows(2).all(|pair| {
                    board
                        .tile(pair[0])
                        .is_some_and(|tile| tile.links_to(pair[1]))
                });
                if !linked {
                    return Err(SnapshotError::Inconsistent(format!(
                        "option {i} leaves the board's links"
                    )));
                }
            }
        }
        Phase::Finished { winner } if winner.index() >= players.len() => {
            return Err(SnapshotError::Inconsistent(format!(
                "winner {winner} is not seated"
            )));
        }
        _ => {}
    }
    Ok(())
}
