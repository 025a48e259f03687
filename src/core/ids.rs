//! Identifiers for board tiles and authored rules.
//!
//! Both are allocated monotonically by their owners (`BoardGraph` and
//! `RuleEngine`) and never reused within a game, so a removed tile or a
//! deleted rule can never be confused with a later one.
//!
//! ```
//! use rulebound::core::{RuleId, TileId};
//!
//! let tile = TileId::new(5);
//! assert_eq!(tile.raw(), 5);
//! assert_eq!(format!("{}", tile), "Tile(5)");
//!
//! let rule = RuleId::new(2);
//! assert_eq!(format!("{}", rule), "Rule(2)");
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a tile on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Create a new tile ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Identifier of a rule in the active rule set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RuleId(pub u32);

impl RuleId {
    /// Create a new rule ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rule({})", self.0)
    }
}
