//! Path resolution: every walk of an exact length from a tile.
//!
//! A walk follows outgoing links one step at a time and never steps onto a
//! tile it has already visited, so a reciprocal link cannot be used to bounce
//! straight back. Walks that run out of links before using all their steps
//! are discarded.
//!
//! Enumeration uses an explicit worklist of partial walks and is fully
//! deterministic: branches are explored in `Up, Down, Left, Right` order.
//!
//! ```
//! use rulebound::board::{BoardGraph, PathResolver};
//! use rulebound::core::TileId;
//!
//! let board = BoardGraph::track(10);
//! let paths = PathResolver::destinations(&board, board.start(), 3);
//! assert_eq!(paths.len(), 1);
//! assert_eq!(paths[0].destination(), TileId::new(3));
//! ```

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::TileId;

use super::graph::BoardGraph;
use super::tile::Direction;

/// Tile sequence of a walk, start tile first.
pub type WalkTiles = SmallVec<[TileId; 16]>;

/// A walk across the board.
///
/// A path always holds at least its start tile; decoding an empty tile list
/// fails.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPath")]
pub struct Path {
    tiles: WalkTiles,
}

#[derive(Deserialize)]
struct RawPath {
    tiles: WalkTiles,
}

impl TryFrom<RawPath> for Path {
    type Error = &'static str;

    fn try_from(raw: RawPath) -> Result<Self, Self::Error> {
        Path::new(raw.tiles).ok_or("a path needs at least one tile")
    }
}

impl Path {
    /// A walk from an explicit tile sequence, or `None` when it is empty.
    #[must_use]
    pub fn new(tiles: WalkTiles) -> Option<Self> {
        if tiles.is_empty() {
            None
        } else {
            Some(Self { tiles })
        }
    }

    /// The zero-length walk standing on `tile`.
    #[must_use]
    pub fn stay(tile: TileId) -> Self {
        let mut tiles = WalkTiles::new();
        tiles.push(tile);
        Self { tiles }
    }

    #[must_use]
    pub fn start(&self) -> TileId {
        self.tiles[0]
    }

    #[must_use]
    pub fn destination(&self) -> TileId {
        self.tiles[self.tiles.len() - 1]
    }

    /// Number of edges walked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len().saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tiles stepped over between start and destination.
    #[must_use]
    pub fn passed_over(&self) -> &[TileId] {
        if self.tiles.len() <= 2 {
            &[]
        } else {
            &self.tiles[1..self.tiles.len() - 1]
        }
    }

    /// Every tile on the walk, start first.
    #[must_use]
    pub fn tiles(&self) -> &[TileId] {
        &self.tiles
    }
}

/// Stateless walk enumeration over a [`BoardGraph`].
pub struct PathResolver;

impl PathResolver {
    /// Every walk of exactly `steps` edges from `start`.
    ///
    /// Unknown start tiles yield nothing; zero steps yields the start tile.
    #[must_use]
    pub fn resolve(board: &BoardGraph, start: TileId, steps: u32) -> Vec<Path> {
        if !board.contains(start) {
            return Vec::new();
        }
        if steps == 0 {
            return vec![Path::stay(start)];
        }

        let target_len = steps as usize + 1;
        let mut complete = Vec::new();
        let mut worklist: Vec<WalkTiles> = Vec::new();

        let mut first = WalkTiles::new();
        first.push(start);
        worklist.push(first);

        while let Some(walk) = worklist.pop() {
            if walk.len() == target_len {
                complete.extend(Path::new(walk));
                continue;
            }

            let Some(&here) = walk.last() else {
                continue;
            };
            let neighbors = board.neighbors_of(here);

            // Pushed in reverse so the stack pops Up first.
            for &(_, next) in neighbors.iter().rev() {
                if walk.contains(&next) {
                    continue;
                }
                let mut extended = walk.clone();
                extended.push(next);
                worklist.push(extended);
            }
        }

        complete
    }

    /// [`resolve`](Self::resolve) deduplicated by destination, keeping the
    /// first walk found for each.
    #[must_use]
    pub fn destinations(board: &BoardGraph, start: TileId, steps: u32) -> Vec<Path> {
        let mut seen = FxHashSet::default();
        Self::resolve(board, start, steps)
            .into_iter()
            .filter(|path| seen.insert(path.destination()))
            .collect()
    }

    /// Tiles reachable in `1..=max_steps` steps, with the smallest step count
    /// that reaches each, in discovery order.
    #[must_use]
    pub fn reach(board: &BoardGraph, start: TileId, max_steps: u32) -> Vec<(TileId, u32)> {
        let mut seen = FxHashSet::default();
        let mut reached = Vec::new();
        for steps in 1..=max_steps {
            for path in Self::destinations(board, start, steps) {
                if seen.insert(path.destination()) {
                    reached.push((path.destination(), steps));
                }
            }
        }
        reached
    }

    /// The direction of the first step of `path`, if it moves at all.
    #[must_use]
    pub fn first_direction(board: &BoardGraph, path: &Path) -> Option<Direction> {
        let next = *path.tiles().get(1)?;
        board
            .neighbors_of(path.start())
            .into_iter()
            .find(|&(_, to)| to == next)
            .map(|(d, _)| d)
    }
}
