//! The playing surface.
//!
//! - `Tile`, `Coord`, `Direction`, `TileKind`: the building blocks
//! - `BoardGraph`: directed graph of tiles, mutable mid-game
//! - `PathResolver`: exact-length walk enumeration for movement
//!
//! Players hold tile ids, never coordinates, so the board can be rewritten
//! under them as long as no occupied tile is removed.

mod graph;
mod path;
mod tile;

pub use graph::{BoardGraph, Neighbors};
pub use path::{Path, PathResolver, WalkTiles};
pub use tile::{Coord, Direction, Tile, TileKind};
