//! Game state.
//!
//! `GameState` is everything about a game except its rule set and its RNG:
//! the board, the roster, the effect ledger, the turn cursor, the permission
//! switches and the history. The rule engine reads and mutates it during
//! evaluation; the turn machine in [`crate::game::Game`] drives it.
//!
//! Outbound events are queued here while an action runs and drained by the
//! game once the action completes.

use im::Vector;
use smallvec::SmallVec;

use crate::board::BoardGraph;
use crate::effects::{EffectLedger, LastEffect, ModifierKind};
use crate::game::GameEvent;
use crate::turn::{Phase, TurnCursor};

use super::action::{Action, ActionRecord};
use super::config::{GameConfig, Permissions, PlayerSetup};
use super::ids::TileId;
use super::player::{Player, PlayerId, PlayerMap};

/// Small player set. A roster never exceeds the colour palette.
pub type PlayerSet = SmallVec<[PlayerId; 6]>;

/// Mutable game state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub board: BoardGraph,
    pub players: PlayerMap<Player>,
    pub ledger: EffectLedger,
    pub cursor: TurnCursor,
    pub permissions: Permissions,
    /// Most recent concrete effect, for copy and reverse.
    pub last_effect: Option<LastEffect>,
    /// Accepted actions, oldest first.
    pub history: Vector<ActionRecord>,
    outbox: Vec<GameEvent>,
}

impl GameState {
    /// Fresh state for a validated configuration and roster.
    ///
    /// Every player starts on the start tile of a straight track of
    /// `config.track_length` tiles.
    #[must_use]
    pub fn new(config: GameConfig, roster: &[PlayerSetup]) -> Self {
        let board = BoardGraph::track(config.track_length);
        Self::on_board(config, board, roster)
    }

    /// Fresh state on a prepared board, every player on its start tile.
    #[must_use]
    pub fn on_board(config: GameConfig, board: BoardGraph, roster: &[PlayerSetup]) -> Self {
        let start = board.start();
        let players = PlayerMap::new(roster.len(), |id| {
            let setup = &roster[id.index()];
            let mut player = Player::new(id, setup.name.clone(), start);
            if let Some(color) = setup.color {
                player = player.with_color(color);
            }
            if let Some(difficulty) = setup.bot {
                player = player.with_bot(difficulty);
            }
            player
        });

        Self::from_parts(config, board, players)
    }

    /// State over an existing board and roster, at the first turn.
    #[must_use]
    pub fn from_parts(config: GameConfig, board: BoardGraph, players: PlayerMap<Player>) -> Self {
        let ledger = EffectLedger::new(players.player_count(), config.stacking);
        Self {
            permissions: config.permissions,
            cursor: TurnCursor::new(PlayerId::new(0)),
            config,
            board,
            players,
            ledger,
            last_effect: None,
            history: Vector::new(),
            outbox: Vec::new(),
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.contains(id).then(|| &self.players[id])
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.cursor.current
    }

    #[must_use]
    pub fn position(&self, id: PlayerId) -> Option<TileId> {
        self.player(id).map(|p| p.position)
    }

    #[must_use]
    pub fn score(&self, id: PlayerId) -> Option<i64> {
        self.player(id).map(|p| p.score)
    }

    /// 1-based rank by score. Tied players share the better rank.
    #[must_use]
    pub fn rank(&self, id: PlayerId) -> Option<u32> {
        let score = self.score(id)?;
        let ahead = self.players.values().filter(|p| p.score > score).count();
        Some(ahead as u32 + 1)
    }

    /// Players standing on `tile`, in seat order.
    #[must_use]
    pub fn players_on(&self, tile: TileId) -> PlayerSet {
        self.players
            .values()
            .filter(|p| p.position == tile)
            .map(|p| p.id)
            .collect()
    }

    #[must_use]
    pub fn is_invisible(&self, id: PlayerId) -> bool {
        self.ledger.has_effect(id, ModifierKind::Invisibility)
    }

    #[must_use]
    pub fn is_shielded(&self, id: PlayerId) -> bool {
        self.ledger.has_effect(id, ModifierKind::Shield)
    }

    /// Players others may target, in seat order.
    #[must_use]
    pub fn visible_players(&self) -> PlayerSet {
        self.players
            .player_ids()
            .filter(|&p| !self.is_invisible(p))
            .collect()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.cursor.phase.is_finished()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.cursor.phase {
            Phase::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    // === Events ===

    /// Queue an outbound event.
    pub fn emit(&mut self, event: GameEvent) {
        self.outbox.push(event);
    }

    /// Take every queued event.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.outbox)
    }

    // === History ===

    /// Record an accepted action in history.
    pub fn record_action(&mut self, player: PlayerId, action: Action) {
        let sequence = self.cursor.next_sequence();
        let record = ActionRecord::new(player, action, self.cursor.turn_number, sequence);
        self.history.push_back(record);
    }
}
