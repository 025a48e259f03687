//! Triggers and conditions: when a rule fires.
//!
//! ## Key Components
//!
//! - [`Trigger`]: the closed set of things a rule can listen for
//! - [`TriggerEvent`]: a trigger that happened to a specific player
//! - [`Condition`]: an extra check on the game state once a trigger matched
//! - [`ConditionEvaluator`]: evaluates conditions against a [`ConditionContext`]
//!
//! ## Example Usage
//!
//! ```
//! use rulebound::core::{GameConfig, GameRng, GameState, PlayerId, PlayerSetup};
//! use rulebound::triggers::{
//!     CompareOp, Condition, ConditionContext, ConditionEvaluator, Observable, Trigger,
//!     TriggerEvent,
//! };
//!
//! let state = GameState::new(
//!     GameConfig::default(),
//!     &[PlayerSetup::human("Ada"), PlayerSetup::human("Bo")],
//! );
//!
//! // "When anyone rolls a 6 ..."
//! let listens_for = Trigger::DiceRoll { value: Some(6) };
//! let event = TriggerEvent::new(Trigger::dice(6), PlayerId::new(0));
//! assert!(listens_for.matches(&event.trigger));
//!
//! // "... and they have no points yet"
//! let broke = Condition::compare(Observable::Score, CompareOp::Eq, 0);
//! let ctx = ConditionContext::new(&event, &state);
//! assert!(ConditionEvaluator::evaluate(&broke, &ctx, &mut GameRng::new(7)));
//! ```

mod condition;
mod event;

pub use condition::{
    CompareOp, Condition, ConditionContext, ConditionEvaluator, LogicMode, MembershipOp,
    Observable,
};
pub use event::{Trigger, TriggerEvent};
