//! Players and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe player identifier. Seats are 0-based and bounded by the colour
//! palette, so a game seats at most [`Color::PALETTE`]`.len()` players.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.
//! Supports iteration and indexing by `PlayerId`.
//!
//! ## Player
//!
//! The mutable per-seat record: score, position and turn bookkeeping.
//! Active temporary effects are kept in the effect ledger, not here.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::bot::Difficulty;

use super::ids::TileId;

/// Player identifier.
///
/// Player indices are 0-based: the first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat after this one, wrapping around.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        PlayerId(((self.index() + 1) % player_count.max(1)) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Token colour. The palette is fixed and small; it also caps the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

impl Color {
    /// Every available colour, in seat-assignment order.
    pub const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
    ];

    /// Default colour for a seat.
    #[must_use]
    pub fn for_seat(player: PlayerId) -> Self {
        Self::PALETTE[player.index() % Self::PALETTE.len()]
    }
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Seat identifier.
    pub id: PlayerId,

    /// Display name.
    pub name: String,

    /// Token colour.
    pub color: Color,

    /// Current score. May go negative.
    pub score: i64,

    /// Tile the token stands on.
    pub position: TileId,

    /// Difficulty tier when the seat is driven by the bot layer.
    pub bot: Option<Difficulty>,

    /// Upcoming turns this player will sit out.
    pub skip_turns: u32,

    /// Extra turns granted, consumed one at a time on advance.
    pub extra_turns: u32,
}

impl Player {
    /// Create a human player standing on `position`.
    pub fn new(id: PlayerId, name: impl Into<String>, position: TileId) -> Self {
        Self {
            id,
            name: name.into(),
            color: Color::for_seat(id),
            score: 0,
            position,
            bot: None,
            skip_turns: 0,
            extra_turns: 0,
        }
    }

    /// Set the colour (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Mark the seat as bot-driven (builder pattern).
    #[must_use]
    pub fn with_bot(mut self, difficulty: Difficulty) -> Self {
        self.bot = Some(difficulty);
        self
    }

    /// Whether the bot layer drives this seat.
    #[must_use]
    pub fn is_bot(&self) -> bool {
        self.bot.is_some()
    }
}

/// Per-player data storage with O(1) access.
///
/// Backed by a `Vec<T>` with one entry per player.
/// Use `PlayerMap::new()` to create with a factory function,
/// or `PlayerMap::with_value()` to initialize all entries to the same value.
///
/// ## Example
///
/// ```
/// use rulebound::core::{PlayerId, PlayerMap};
///
/// let mut scores: PlayerMap<i64> = PlayerMap::new(4, |_| 0);
/// scores[PlayerId::new(1)] = 15;
/// assert_eq!(scores[PlayerId::new(1)], 15);
/// assert_eq!(scores[PlayerId::new(0)], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    ///
    /// The factory receives the `PlayerId` for each player.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Build from a vector ordered by seat.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Check whether a player ID is seated in this map.
    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}
