//! # rulebound
//!
//! A turn-based board game engine whose rules change while it is played.
//!
//! Players roll a die and walk a grid of linked tiles. After moving, each
//! player may make one modification: write, edit, reorder or toggle a rule,
//! or grow or shrink the board. Rules listen for triggers (landing on a
//! tile, rolling a value, a score change, another rule's effect expiring)
//! and fire effects that move players, change scores, grant temporary
//! modifiers or declare a winner.
//!
//! ## Design Principles
//!
//! 1. **Single Writer**: [`Game`] owns the state, the rule set and the RNG.
//!    Every inbound action goes through one guard; rejected actions change
//!    nothing.
//!
//! 2. **Deterministic**: all randomness comes from one seeded ChaCha8 RNG,
//!    so a seed and an action log replay a game exactly.
//!
//! 3. **Bounded Cascades**: rule effects raise new triggers, but every
//!    inbound event has a depth and event budget.
//!
//! ## Modules
//!
//! - `core`: ids, players, state, actions, RNG, configuration, errors
//! - `board`: the tile graph and walk enumeration
//! - `effects`: effect vocabulary, targeting, the temporary effect ledger
//! - `triggers`: trigger vocabulary and conditions
//! - `rules`: rule definitions and the cascading rule engine
//! - `turn`: phases and the action guard
//! - `game`: the session, outbound events and snapshots
//! - `bot`: heuristic players

pub mod core;
pub mod board;
pub mod effects;
pub mod triggers;
pub mod rules;
pub mod turn;
pub mod game;
pub mod bot;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ConfigError, GameConfig, GameRng, GameState, Permission, Permissions,
    PlayerId, PlayerSetup, RuleId, StackingPolicy, TileId,
};

pub use crate::board::{BoardGraph, Coord, Direction, Path, PathResolver, TileKind};

pub use crate::effects::{Effect, EffectKind, EffectLedger, Modifier, Target};

pub use crate::triggers::{CompareOp, Condition, LogicMode, Observable, Trigger};

pub use crate::rules::{Rule, RuleEngine};

pub use crate::turn::Phase;

pub use crate::game::{Game, GameBuilder, GameEvent, GameSnapshot};

pub use crate::bot::{BotPlayer, Difficulty};
