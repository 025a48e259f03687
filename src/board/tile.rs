//! Tiles, grid coordinates and link directions.

use serde::{Deserialize, Serialize};

use crate::core::TileId;

/// Integer grid coordinate. `y` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate one step away in `direction`.
    #[must_use]
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Link direction. Iteration order everywhere is `Up, Down, Left, Right`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Grid delta `(dx, dy)`.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    const fn slot(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// What a tile is for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Normal,
    /// Marked for rules to key off; no built-in behaviour.
    Special,
    /// Where every player begins. Exactly one per board.
    Start,
    /// Reaching one fires `ReachEnd`.
    End,
}

/// A board tile with up to four outgoing links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub coord: Coord,
    pub kind: TileKind,
    links: [Option<TileId>; 4],
}

impl Tile {
    /// A tile with no links yet.
    #[must_use]
    pub fn new(id: TileId, coord: Coord, kind: TileKind) -> Self {
        Self {
            id,
            coord,
            kind,
            links: [None; 4],
        }
    }

    /// Add a link (builder pattern). Used to assemble tile lists by hand.
    #[must_use]
    pub fn with_link(mut self, direction: Direction, to: TileId) -> Self {
        self.set_link(direction, Some(to));
        self
    }

    /// The tile this one links to in `direction`.
    #[must_use]
    pub fn link(&self, direction: Direction) -> Option<TileId> {
        self.links[direction.slot()]
    }

    /// Outgoing links in direction order.
    pub fn links(&self) -> impl Iterator<Item = (Direction, TileId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.link(d).map(|to| (d, to)))
    }

    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.iter().filter(|l| l.is_some()).count()
    }

    #[must_use]
    pub fn links_to(&self, target: TileId) -> bool {
        self.links.contains(&Some(target))
    }

    pub(crate) fn set_link(&mut self, direction: Direction, to: Option<TileId>) {
        self.links[direction.slot()] = to;
    }

    /// Drop every link pointing at `target`. Returns whether any was removed.
    pub(crate) fn unlink(&mut self, target: TileId) -> bool {
        let mut removed = false;
        for slot in self.links.iter_mut() {
            if *slot == Some(target) {
                *slot = None;
                removed = true;
            }
        }
        removed
    }
}
