//! Player-authored rules and the engine that runs them.
//!
//! - [`Rule`]: trigger, conditions, effects and else-effects
//! - [`RuleEngine`]: owns the rule set, validates changes and evaluates
//!   trigger events, cascades included
//!
//! The rest of the crate only reaches the rule set through `&RuleEngine`
//! or a snapshot; every change goes through the engine's commands.

mod engine;
mod rule;

pub use engine::RuleEngine;
pub use rule::{Rule, RuleBranch};
