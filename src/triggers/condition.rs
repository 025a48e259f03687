//! Rule conditions.
//!
//! A rule's conditions are checked after its trigger matched. Each condition
//! looks at one or more *subject* players: the event's player by default, or
//! whoever a [`Target`] selector resolves to. With several subjects, every
//! one of them must satisfy the condition; an empty subject set never does.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, GameState};
use crate::effects::{targeting, ModifierKind, Target};

use super::event::TriggerEvent;

/// A measurable quantity of the game or of a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Observable {
    /// The subject's score.
    Score,
    /// Hops from the start tile to the subject's tile.
    Position,
    /// This turn's roll. Fails before anything was rolled.
    DiceValue,
    /// The current turn number.
    TurnCount,
    PlayerCount,
    /// The subject's 1-based rank by score, ties sharing the better rank.
    Rank,
    /// Hops from the subject's tile to the nearest end tile.
    TilesFromEnd,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,
}

impl CompareOp {
    #[must_use]
    pub fn apply(self, lhs: i64, rhs: i64) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Neq => lhs != rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Gte => lhs >= rhs,
            CompareOp::Lte => lhs <= rhs,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipOp {
    Contains,
    NotContains,
}

/// How a rule combines its conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicMode {
    #[default]
    And,
    Or,
}

/// A single rule condition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    /// Compare an observable against a constant.
    Compare {
        observable: Observable,
        op: CompareOp,
        value: i64,
        /// `None` means the event's player.
        subject: Option<Target>,
    },
    /// Test whether the subject carries a modifier kind.
    ActiveEffect {
        modifier: ModifierKind,
        op: MembershipOp,
        subject: Option<Target>,
    },
}

impl Condition {
    /// Compare an observable of the event's player.
    #[must_use]
    pub fn compare(observable: Observable, op: CompareOp, value: i64) -> Self {
        Condition::Compare {
            observable,
            op,
            value,
            subject: None,
        }
    }

    /// Require the event's player to carry (or lack) a modifier.
    #[must_use]
    pub fn has_effect(modifier: ModifierKind, op: MembershipOp) -> Self {
        Condition::ActiveEffect {
            modifier,
            op,
            subject: None,
        }
    }

    /// Evaluate against another subject (builder pattern).
    #[must_use]
    pub fn about(mut self, target: Target) -> Self {
        match &mut self {
            Condition::Compare { subject, .. } | Condition::ActiveEffect { subject, .. } => {
                *subject = Some(target);
            }
        }
        self
    }
}

/// Context for evaluating conditions.
pub struct ConditionContext<'a> {
    /// The event being checked.
    pub event: &'a TriggerEvent,
    /// Current game state.
    pub state: &'a GameState,
}

impl<'a> ConditionContext<'a> {
    /// Create a new context.
    pub fn new(event: &'a TriggerEvent, state: &'a GameState) -> Self {
        Self { event, state }
    }

    /// Read an observable for one player. `None` when it has no value.
    #[must_use]
    pub fn observe(&self, observable: Observable, player: crate::core::PlayerId) -> Option<i64> {
        let state = self.state;
        match observable {
            Observable::Score => state.score(player),
            Observable::Position => {
                let tile = state.position(player)?;
                state.board.distance_from_start(tile).map(i64::from)
            }
            Observable::DiceValue => state.cursor.last_dice.map(i64::from),
            Observable::TurnCount => Some(i64::from(state.cursor.turn_number)),
            Observable::PlayerCount => Some(state.player_count() as i64),
            Observable::Rank => state.rank(player).map(i64::from),
            Observable::TilesFromEnd => {
                let tile = state.position(player)?;
                state.board.distance_to_end(tile).map(i64::from)
            }
        }
    }
}

/// Evaluator for rule conditions.
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// Check if a condition is satisfied.
    ///
    /// `Random` subjects draw from `rng`.
    pub fn evaluate(condition: &Condition, ctx: &ConditionContext, rng: &mut GameRng) -> bool {
        match condition {
            Condition::Compare {
                observable,
                op,
                value,
                subject,
            } => {
                let subjects = Self::subjects(*subject, ctx, rng);
                !subjects.is_empty()
                    && subjects.iter().all(|&p| {
                        ctx.observe(*observable, p)
                            .is_some_and(|observed| op.apply(observed, *value))
                    })
            }
            Condition::ActiveEffect {
                modifier,
                op,
                subject,
            } => {
                let subjects = Self::subjects(*subject, ctx, rng);
                !subjects.is_empty()
                    && subjects.iter().all(|&p| {
                        let has = ctx.state.ledger.has_effect(p, *modifier);
                        match op {
                            MembershipOp::Contains => has,
                            MembershipOp::NotContains => !has,
                        }
                    })
            }
        }
    }

    /// Combine a rule's conditions. An empty list always passes.
    pub fn evaluate_all(
        conditions: &[Condition],
        mode: LogicMode,
        ctx: &ConditionContext,
        rng: &mut GameRng,
    ) -> bool {
        if conditions.is_empty() {
            return true;
        }
        match mode {
            LogicMode::And => conditions.iter().all(|c| Self::evaluate(c, ctx, rng)),
            LogicMode::Or => conditions.iter().any(|c| Self::evaluate(c, ctx, rng)),
        }
    }

    fn subjects(
        subject: Option<Target>,
        ctx: &ConditionContext,
        rng: &mut GameRng,
    ) -> crate::core::PlayerSet {
        match subject {
            None => {
                let mut set = crate::core::PlayerSet::new();
                if ctx.state.players.contains(ctx.event.player) {
                    set.push(ctx.event.player);
                }
                set
            }
            Some(target) => targeting::resolve(target, ctx.event.player, ctx.state, rng),
        }
    }
}
