//! Game configuration types.
//!
//! A game is configured once at startup:
//! - `GameConfig`: dice, stacking policy, cascade limits, host and permissions
//! - `PlayerSetup`: one entry per seat, human or bot
//!
//! Everything here derives serde traits so an embedding application can load
//! a configuration from whatever format it likes. `GameBuilder` in
//! [`crate::game`] validates the combination before a game exists.

use serde::{Deserialize, Serialize};

use crate::bot::Difficulty;

use super::error::ConfigError;
use super::player::{Color, PlayerId};

/// What happens when a modifier of a kind the player already carries is
/// applied again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackingPolicy {
    /// Keep one entry; its duration becomes the larger of old and new.
    #[default]
    Refresh,
    /// Keep a separate entry per application.
    Stack,
    /// Leave the existing entry untouched.
    Ignore,
}

/// A kind of board or rule-set mutation players may perform during `Modify`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Permission {
    /// Create, update, delete, reorder or toggle rules.
    Rule,
    /// Add or remove tiles.
    Tile,
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Permission::Rule => write!(f, "rule"),
            Permission::Tile => write!(f, "tile"),
        }
    }
}

/// Global switches gating non-host modifications.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permissions {
    pub allow_rule_creation: bool,
    pub allow_tile_creation: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self {
            allow_rule_creation: true,
            allow_tile_creation: true,
        }
    }
}

impl Permissions {
    /// Whether non-host players may perform this kind of modification.
    #[must_use]
    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::Rule => self.allow_rule_creation,
            Permission::Tile => self.allow_tile_creation,
        }
    }

    /// Flip one switch.
    pub fn set(&mut self, permission: Permission, allowed: bool) {
        match permission {
            Permission::Rule => self.allow_rule_creation = allowed,
            Permission::Tile => self.allow_tile_creation = allowed,
        }
    }
}

/// One seat in the starting roster.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub color: Option<Color>,
    pub bot: Option<Difficulty>,
}

impl PlayerSetup {
    /// A human seat.
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: None,
            bot: None,
        }
    }

    /// A bot seat at the given difficulty.
    pub fn bot(name: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            name: name.into(),
            color: None,
            bot: Some(difficulty),
        }
    }

    /// Pick a colour instead of the seat default.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Faces on the die. Rolls are uniform in `1..=dice_sides` before modifiers.
    pub dice_sides: u32,

    /// Re-application behaviour of temporary modifiers.
    pub stacking: StackingPolicy,

    /// Added to a roll while `SpeedBoost` is active.
    pub speed_boost_bonus: u32,

    /// `NearVictory` fires when a player comes within this many hops of an end tile.
    pub near_victory_distance: u32,

    /// How many generations of derived trigger events a single inbound
    /// event may cause.
    pub max_cascade_depth: u32,

    /// Upper bound on trigger events processed for one inbound event.
    pub max_cascade_events: usize,

    /// The host bypasses the permission switches.
    pub host: PlayerId,

    /// Initial permission switches.
    pub permissions: Permissions,

    /// Tiles in the starting straight track, start and end included.
    pub track_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            dice_sides: 6,
            stacking: StackingPolicy::Refresh,
            speed_boost_bonus: 2,
            near_victory_distance: 3,
            max_cascade_depth: 8,
            max_cascade_events: 256,
            host: PlayerId::new(0),
            permissions: Permissions::default(),
            track_length: 10,
        }
    }
}

impl GameConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of die faces.
    #[must_use]
    pub fn with_dice_sides(mut self, sides: u32) -> Self {
        self.dice_sides = sides;
        self
    }

    /// Set the stacking policy.
    #[must_use]
    pub fn with_stacking(mut self, stacking: StackingPolicy) -> Self {
        self.stacking = stacking;
        self
    }

    /// Set the speed-boost bonus.
    #[must_use]
    pub fn with_speed_boost_bonus(mut self, bonus: u32) -> Self {
        self.speed_boost_bonus = bonus;
        self
    }

    /// Set the near-victory distance.
    #[must_use]
    pub fn with_near_victory_distance(mut self, distance: u32) -> Self {
        self.near_victory_distance = distance;
        self
    }

    /// Set both cascade limits.
    #[must_use]
    pub fn with_cascade_limits(mut self, depth: u32, events: usize) -> Self {
        self.max_cascade_depth = depth;
        self.max_cascade_events = events;
        self
    }

    /// Set the host.
    #[must_use]
    pub fn with_host(mut self, host: PlayerId) -> Self {
        self.host = host;
        self
    }

    /// Set the initial permissions.
    #[must_use]
    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Set the starting track length.
    #[must_use]
    pub fn with_track_length(mut self, length: usize) -> Self {
        self.track_length = length;
        self
    }

    /// Highest value a roll can reach once modifiers are applied.
    #[must_use]
    pub fn max_roll(&self) -> u32 {
        self.dice_sides
            .saturating_mul(2)
            .saturating_add(self.speed_boost_bonus)
    }

    /// Check this configuration against a roster size.
    pub fn validate(&self, player_count: usize) -> Result<(), ConfigError> {
        if player_count == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if player_count > Color::PALETTE.len() {
            return Err(ConfigError::TooManyPlayers {
                count: player_count,
                max: Color::PALETTE.len(),
            });
        }
        if self.dice_sides == 0 {
            return Err(ConfigError::InvalidDiceSides(self.dice_sides));
        }
        if self.host.index() >= player_count {
            return Err(ConfigError::HostNotSeated(self.host));
        }
        if self.track_length < 2 {
            return Err(ConfigError::TrackTooShort(self.track_length));
        }
        if self.max_cascade_events == 0 {
            return Err(ConfigError::ZeroCascadeBudget);
        }
        Ok(())
    }
}
