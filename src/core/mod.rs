//! Core engine types: ids, players, state, actions, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these. The board, the rules and the
//! ledger are owned by [`GameState`]; the session is the only writer.

pub mod ids;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod action;
pub mod state;
pub mod movement;

pub use ids::{RuleId, TileId};
pub use player::{Color, Player, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, Permission, Permissions, PlayerSetup, StackingPolicy};
pub use error::{
    ActionError, ConfigError, IllegalAction, InvalidTileMutation, MalformedRule, SnapshotError,
};
pub use action::{Action, ActionRecord};
pub use state::{GameState, PlayerSet};
pub use movement::MoveTriggers;
