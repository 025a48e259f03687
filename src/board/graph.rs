//! The board as a directed graph of grid tiles.
//!
//! ## Invariants
//!
//! - Exactly one `Start` tile exists, and it can never be removed.
//! - At most one tile per coordinate.
//! - A link in direction `d` always points at the tile on the adjacent
//!   coordinate in `d`.
//! - No link ever points at a tile that is not on the board.
//!
//! Tiles are indexed both by id and by coordinate with `FxHashMap`. Ids are
//! allocated monotonically and never reused.
//!
//! ```
//! use rulebound::board::{BoardGraph, Direction};
//!
//! let mut board = BoardGraph::new();
//! let start = board.start();
//! let right = board.add_tile(start, Direction::Right).unwrap();
//!
//! // Links are reciprocal.
//! assert_eq!(board.tile(start).unwrap().link(Direction::Right), Some(right));
//! assert_eq!(board.tile(right).unwrap().link(Direction::Left), Some(start));
//! ```

use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::core::{InvalidTileMutation, TileId};

use super::tile::{Coord, Direction, Tile, TileKind};

/// Neighbor list in direction order.
pub type Neighbors = SmallVec<[(Direction, TileId); 4]>;

/// The board graph. Sole owner of tiles.
#[derive(Clone, Debug)]
pub struct BoardGraph {
    tiles: FxHashMap<TileId, Tile>,
    by_coord: FxHashMap<Coord, TileId>,
    start: TileId,
    next_id: u32,
}

impl Default for BoardGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardGraph {
    /// A board with a lone start tile at the origin.
    #[must_use]
    pub fn new() -> Self {
        let start = TileId::new(0);
        let origin = Coord::new(0, 0);

        let mut tiles = FxHashMap::default();
        tiles.insert(start, Tile::new(start, origin, TileKind::Start));
        let mut by_coord = FxHashMap::default();
        by_coord.insert(origin, start);

        Self {
            tiles,
            by_coord,
            start,
            next_id: 1,
        }
    }

    /// A straight track of `len` tiles running right from the start, the last
    /// one an `End` tile. Lengths below two yield a lone start tile.
    #[must_use]
    pub fn track(len: usize) -> Self {
        let mut board = Self::new();
        let mut previous = board.start;

        for i in 1..len {
            let kind = if i + 1 == len {
                TileKind::End
            } else {
                TileKind::Normal
            };
            let coord = Coord::new(i as i32, 0);
            previous = board.insert_linked(previous, coord, Direction::Right, kind);
        }

        board
    }

    /// Rebuild a board from a tile list, allocating future ids after the
    /// highest one present.
    pub fn from_tiles(tiles: Vec<Tile>) -> Result<Self, InvalidTileMutation> {
        let next_id = tiles.iter().map(|t| t.id.raw() + 1).max().unwrap_or(0);
        Self::from_parts(tiles, next_id)
    }

    /// Rebuild a board from a tile list and an explicit next id.
    ///
    /// Checks every graph invariant; nothing is trusted.
    pub fn from_parts(tiles: Vec<Tile>, next_id: u32) -> Result<Self, InvalidTileMutation> {
        let mut map = FxHashMap::default();
        let mut by_coord = FxHashMap::default();
        let mut start = None;

        for tile in tiles {
            if tile.id.raw() >= next_id {
                return Err(InvalidTileMutation::Inconsistent(format!(
                    "{} is not below the next id {}",
                    tile.id, next_id
                )));
            }
            if tile.kind == TileKind::Start {
                if start.is_some() {
                    return Err(InvalidTileMutation::DuplicateStart);
                }
                start = Some(tile.id);
            }
            if by_coord.insert(tile.coord, tile.id).is_some() {
                return Err(InvalidTileMutation::PositionOccupied(tile.coord));
            }
            if let Some(existing) = map.insert(tile.id, tile) {
                return Err(InvalidTileMutation::Inconsistent(format!(
                    "{} appears twice",
                    existing.id
                )));
            }
        }

        let start = start.ok_or_else(|| {
            InvalidTileMutation::Inconsistent("board has no start tile".to_string())
        })?;

        for tile in map.values() {
            for (direction, to) in tile.links() {
                let expected = tile.coord.offset(direction);
                if by_coord.get(&expected) != Some(&to) {
                    return Err(InvalidTileMutation::Inconsistent(format!(
                        "{} links {:?} to {}, which is not at {}",
                        tile.id, direction, to, expected
                    )));
                }
            }
        }

        Ok(Self {
            tiles: map,
            by_coord,
            start,
            next_id,
        })
    }

    // === Queries ===

    /// The start tile.
    #[must_use]
    pub fn start(&self) -> TileId {
        self.start
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.contains_key(&id)
    }

    #[must_use]
    pub fn tile_at(&self, coord: Coord) -> Option<&Tile> {
        self.by_coord.get(&coord).and_then(|id| self.tiles.get(id))
    }

    /// All tiles in id order.
    #[must_use]
    pub fn tiles(&self) -> Vec<&Tile> {
        let mut tiles: Vec<&Tile> = self.tiles.values().collect();
        tiles.sort_by_key(|t| t.id);
        tiles
    }

    /// The id the next added tile will receive.
    #[must_use]
    pub fn next_tile_id(&self) -> u32 {
        self.next_id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false: the start tile cannot be removed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Outgoing links of `id` in direction order. Empty for unknown tiles.
    #[must_use]
    pub fn neighbors_of(&self, id: TileId) -> Neighbors {
        self.tiles
            .get(&id)
            .map(|t| t.links().collect())
            .unwrap_or_default()
    }

    /// Ids of every `End` tile, in id order.
    #[must_use]
    pub fn end_tiles(&self) -> Vec<TileId> {
        let mut ends: Vec<TileId> = self
            .tiles
            .values()
            .filter(|t| t.kind == TileKind::End)
            .map(|t| t.id)
            .collect();
        ends.sort();
        ends
    }

    // === Mutation ===

    /// Add a `Normal` tile next to `from`, linked both ways.
    pub fn add_tile(
        &mut self,
        from: TileId,
        direction: Direction,
    ) -> Result<TileId, InvalidTileMutation> {
        self.add_tile_of_kind(from, direction, TileKind::Normal)
    }

    /// Add a tile of the given kind next to `from`, linked both ways.
    pub fn add_tile_of_kind(
        &mut self,
        from: TileId,
        direction: Direction,
        kind: TileKind,
    ) -> Result<TileId, InvalidTileMutation> {
        let origin = self
            .tiles
            .get(&from)
            .ok_or(InvalidTileMutation::UnknownTile(from))?;
        if kind == TileKind::Start {
            return Err(InvalidTileMutation::DuplicateStart);
        }

        let coord = origin.coord.offset(direction);
        if self.by_coord.contains_key(&coord) {
            return Err(InvalidTileMutation::PositionOccupied(coord));
        }

        Ok(self.insert_linked(from, coord, direction, kind))
    }

    /// Link two existing adjacent tiles. One-way unless `reciprocal`.
    pub fn connect(
        &mut self,
        from: TileId,
        direction: Direction,
        reciprocal: bool,
    ) -> Result<TileId, InvalidTileMutation> {
        let origin = self
            .tiles
            .get(&from)
            .ok_or(InvalidTileMutation::UnknownTile(from))?;
        let coord = origin.coord.offset(direction);
        let to = *self
            .by_coord
            .get(&coord)
            .ok_or(InvalidTileMutation::NoTileInDirection { from, coord })?;

        self.set_link(from, direction, Some(to));
        if reciprocal {
            self.set_link(to, direction.opposite(), Some(from));
        }
        Ok(to)
    }

    /// Remove a tile and every link pointing at it.
    ///
    /// A neighbor left without any outgoing link is re-linked to another
    /// adjacent tile when one exists.
    pub fn remove_tile(&mut self, id: TileId) -> Result<Tile, InvalidTileMutation> {
        if id == self.start {
            return Err(InvalidTileMutation::IsStartTile);
        }
        let removed = self
            .tiles
            .remove(&id)
            .ok_or(InvalidTileMutation::UnknownTile(id))?;
        self.by_coord.remove(&removed.coord);

        let mut orphaned = Vec::new();
        for tile in self.tiles.values_mut() {
            if tile.unlink(id) && tile.link_count() == 0 {
                orphaned.push(tile.id);
            }
        }
        orphaned.sort();

        for tile_id in orphaned {
            self.relink(tile_id);
        }

        Ok(removed)
    }

    fn relink(&mut self, id: TileId) {
        let Some(coord) = self.tiles.get(&id).map(|t| t.coord) else {
            return;
        };
        let candidate = Direction::ALL.into_iter().find_map(|d| {
            self.by_coord
                .get(&coord.offset(d))
                .map(|&neighbor| (d, neighbor))
        });
        if let Some((direction, neighbor)) = candidate {
            self.set_link(id, direction, Some(neighbor));
            self.set_link(neighbor, direction.opposite(), Some(id));
        }
    }

    fn insert_linked(
        &mut self,
        from: TileId,
        coord: Coord,
        direction: Direction,
        kind: TileKind,
    ) -> TileId {
        let id = TileId::new(self.next_id);
        self.next_id += 1;

        let tile = Tile::new(id, coord, kind).with_link(direction.opposite(), from);
        self.tiles.insert(id, tile);
        self.by_coord.insert(coord, id);
        self.set_link(from, direction, Some(id));
        id
    }

    fn set_link(&mut self, tile: TileId, direction: Direction, to: Option<TileId>) {
        if let Some(t) = self.tiles.get_mut(&tile) {
            t.set_link(direction, to);
        }
    }

    // === Distances ===

    /// Shortest directed hop count from `from` to `to`.
    #[must_use]
    pub fn distance(&self, from: TileId, to: TileId) -> Option<u32> {
        self.bfs(from, |t| t.id == to)
    }

    #[must_use]
    pub fn distance_from_start(&self, id: TileId) -> Option<u32> {
        self.distance(self.start, id)
    }

    /// Shortest directed hop count from `id` to any `End` tile.
    #[must_use]
    pub fn distance_to_end(&self, id: TileId) -> Option<u32> {
        self.bfs(id, |t| t.kind == TileKind::End)
    }

    /// Fraction of the start-to-end route covered at `id`, in `0.0..=1.0`.
    ///
    /// Zero when either leg is unreachable.
    #[must_use]
    pub fn progress(&self, id: TileId) -> f64 {
        match (self.distance_from_start(id), self.distance_to_end(id)) {
            (_, Some(0)) => 1.0,
            (Some(done), Some(left)) => f64::from(done) / f64::from(done + left),
            _ => 0.0,
        }
    }

    fn bfs(&self, from: TileId, mut goal: impl FnMut(&Tile) -> bool) -> Option<u32> {
        let origin = self.tiles.get(&from)?;
        if goal(origin) {
            return Some(0);
        }

        let mut seen = FxHashSet::default();
        seen.insert(from);
        let mut queue = VecDeque::new();
        queue.push_back((from, 0u32));

        while let Some((current, depth)) = queue.pop_front() {
            let Some(tile) = self.tiles.get(&current) else {
                continue;
            };
            for (_, next) in tile.links() {
                if !seen.insert(next) {
                    continue;
                }
                let Some(next_tile) = self.tiles.get(&next) else {
                    continue;
                };
                if goal(next_tile) {
                    return Some(depth + 1);
                }
                queue.push_back((next, depth + 1));
            }
        }

        None
    }
}
