//! Moving tokens and the trigger events movement raises.
//!
//! Every position change goes through [`GameState::relocate`], whether it
//! comes from a roll, a `Move`, a teleport or a swap, so the derived events
//! are always the same:
//!
//! 1. `PassOver` for each tile crossed, in order
//! 2. `Land` on the destination
//! 3. `HalfBoard` when progress crosses one half
//! 4. `NearVictory` when the distance to an end tile drops to the threshold
//! 5. `ReachEnd` on an end tile
//! 6. `SameTile` and `Overtake` against other visible players

use smallvec::SmallVec;

use crate::board::{Path, TileKind, WalkTiles};
use crate::game::GameEvent;
use crate::triggers::{Trigger, TriggerEvent};

use super::ids::TileId;
use super::player::PlayerId;
use super::state::GameState;

/// Trigger events raised by one movement.
pub type MoveTriggers = SmallVec<[TriggerEvent; 8]>;

impl GameState {
    /// Move `player` along `path`, which must start on their tile.
    ///
    /// Zero-length paths change nothing and raise nothing.
    pub fn relocate(&mut self, player: PlayerId, path: &Path) -> MoveTriggers {
        let mut triggers = MoveTriggers::new();
        if !self.players.contains(player)
            || path.is_empty()
            || !self.board.contains(path.destination())
        {
            return triggers;
        }

        let from = self.players[player].position;
        let to = path.destination();

        let before_progress = self.board.progress(from);
        let before_to_end = self.board.distance_to_end(from);
        let rivals = self.proximity_rivals(player);
        let rival_distances: Vec<(PlayerId, Option<u32>)> = rivals
            .iter()
            .map(|&r| (r, self.board.distance_to_end(self.players[r].position)))
            .collect();

        self.players[player].position = to;
        self.emit(GameEvent::PlayerMoved {
            player,
            from,
            to,
            path: path.tiles().to_vec(),
        });

        for &tile in path.passed_over() {
            triggers.push(TriggerEvent::new(Trigger::pass_over(tile), player));
        }
        triggers.push(TriggerEvent::new(Trigger::land(to), player));

        if before_progress < 0.5 && self.board.progress(to) >= 0.5 {
            triggers.push(TriggerEvent::new(Trigger::HalfBoard, player));
        }

        let near = self.config.near_victory_distance;
        let after_to_end = self.board.distance_to_end(to);
        let was_near = before_to_end.is_some_and(|d| d <= near);
        if !was_near && after_to_end.is_some_and(|d| d <= near) {
            triggers.push(TriggerEvent::new(Trigger::NearVictory, player));
        }

        if self.board.tile(to).is_some_and(|t| t.kind == TileKind::End) {
            triggers.push(TriggerEvent::new(Trigger::ReachEnd, player));
        }

        for &rival in &rivals {
            if self.players[rival].position == to {
                triggers.push(TriggerEvent::new(
                    Trigger::SameTile { other: Some(rival) },
                    player,
                ));
            }
        }

        for (rival, rival_to_end) in rival_distances {
            let (Some(before), Some(after), Some(theirs)) =
                (before_to_end, after_to_end, rival_to_end)
            else {
                continue;
            };
            if before > theirs && after < theirs {
                triggers.push(TriggerEvent::new(
                    Trigger::Overtake { other: Some(rival) },
                    player,
                ));
            }
        }

        triggers
    }

    /// Jump `player` straight to `tile` without crossing anything.
    pub fn jump(&mut self, player: PlayerId, tile: TileId) -> MoveTriggers {
        let Some(from) = self.position(player) else {
            return MoveTriggers::new();
        };
        let mut tiles = WalkTiles::new();
        tiles.push(from);
        if from != tile {
            tiles.push(tile);
        }
        let Some(path) = Path::new(tiles) else {
            return MoveTriggers::new();
        };
        self.relocate(player, &path)
    }

    /// Other players that take part in proximity triggers with `player`.
    ///
    /// Invisible players are excluded on both sides.
    fn proximity_rivals(&self, player: PlayerId) -> SmallVec<[PlayerId; 6]> {
        if self.is_invisible(player) {
            return SmallVec::new();
        }
        self.visible_players()
            .into_iter()
            .filter(|&p| p != player)
            .collect()
    }
}
