//! Turn state machine.
//!
//! A turn runs `Roll` → (`ChoosePath`) → `Modify` and then advances to the
//! next player. [`TurnCursor`] holds where the turn stands; [`check`] decides
//! whether an action is allowed, with one code path for humans and bots.
//! The transitions themselves live on [`crate::game::Game`], which owns both
//! the state and the rule engine they evaluate.

mod guard;
mod phase;

pub use guard::{can_modify, check};
pub use phase::{Phase, TurnCursor};
