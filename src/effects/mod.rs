//! Effect system: what rules do when they fire.
//!
//! - [`Effect`]: one entry of the closed effect vocabulary plus a [`Target`]
//! - [`EffectLedger`]: duration-bound modifiers per player
//! - [`EffectResolver`]: executes effects on game state
//! - [`targeting`]: turns a [`Target`] into concrete players
//!
//! ## Design Philosophy
//!
//! Effects only touch the state through a few well-known paths: positions
//! change through `GameState::relocate`, scores through one helper that
//! raises `ScoreChange`, and durations through the ledger. Everything an
//! effect changes therefore shows up as a trigger event the rule engine can
//! react to.

mod effect;
mod ledger;
mod resolver;
pub mod targeting;

pub use effect::{
    AppliedEffect, Effect, EffectKind, EffectOutcome, LastEffect, Modifier, ModifierKind, Target,
};
pub use ledger::{EffectLedger, EffectSource, LedgerOutcome, TemporaryEffect};
pub use resolver::{EffectResolver, Resolution};
