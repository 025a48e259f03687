//! The rule engine: sole owner of the active rule set.
//!
//! Rules are kept in declaration order in an `im::Vector`, so cloning the
//! engine for a bot look-ahead or a snapshot is cheap.
//!
//! ## Evaluation
//!
//! For one trigger event, every active rule listening for it fires in
//! ascending priority, ties in declaration order. A rule whose conditions
//! pass runs its effects in list order; one whose conditions fail runs its
//! else-effects, if any.
//!
//! Effects raise derived trigger events (score changes, movement, applied
//! modifiers). Those are queued and evaluated breadth-first. A cascade stops
//! growing past `GameConfig::max_cascade_depth` generations or after
//! `GameConfig::max_cascade_events` processed events; whatever is left is
//! dropped with a warning. A finished game stops evaluation at once.

use std::collections::VecDeque;

use im::Vector;
use tracing::{debug, warn};

use crate::core::{ActionError, GameRng, GameState, MalformedRule, RuleId};
use crate::effects::{AppliedEffect, EffectResolver};
use crate::game::GameEvent;
use crate::triggers::{ConditionContext, ConditionEvaluator, Trigger, TriggerEvent};

use super::rule::{Rule, RuleBranch};

/// Owns and evaluates the rule set.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleEngine {
    rules: Vector<Rule>,
    next_id: u32,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// An empty rule set. Ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: Vector::new(),
            next_id: 1,
        }
    }

    /// Rebuild from stored rules, in declaration order.
    ///
    /// Ids are kept as stored; `next_id` must lie above all of them.
    pub fn from_parts(rules: Vec<Rule>, next_id: u32) -> Result<Self, MalformedRule> {
        for rule in &rules {
            rule.validate_shape()?;
        }
        Ok(Self {
            rules: rules.into_iter().collect(),
            next_id,
        })
    }

    // === Commands ===

    /// Validate and install `rule` at the end of the declaration order.
    pub fn add(&mut self, mut rule: Rule, state: &GameState) -> Result<RuleId, MalformedRule> {
        rule.validate(&state.board, state.config.max_roll())?;

        let id = RuleId::new(self.next_id);
        self.next_id += 1;
        rule.id = id;
        debug!(rule = %id, title = %rule.title, "rule added");
        self.rules.push_back(rule);
        Ok(id)
    }

    /// Replace the definition of rule `id`, keeping its id and position.
    ///
    /// The original author is kept when the replacement names none.
    pub fn update(
        &mut self,
        id: RuleId,
        mut rule: Rule,
        state: &GameState,
    ) -> Result<(), ActionError> {
        let index = self.index_of(id)?;
        rule.validate(&state.board, state.config.max_roll())?;

        rule.id = id;
        if rule.author.is_none() {
            rule.author = self.rules[index].author;
        }
        self.rules[index] = rule;
        Ok(())
    }

    /// Remove rule `id`.
    pub fn delete(&mut self, id: RuleId) -> Result<Rule, ActionError> {
        let index = self.index_of(id)?;
        Ok(self.rules.remove(index))
    }

    /// Move rule `id` to declaration index `index`, clamped to the end.
    /// Returns the index it landed on.
    pub fn reorder(&mut self, id: RuleId, index: usize) -> Result<usize, ActionError> {
        let from = self.index_of(id)?;
        let rule = self.rules.remove(from);
        let to = index.min(self.rules.len());
        self.rules.insert(to, rule);
        Ok(to)
    }

    pub fn set_active(&mut self, id: RuleId, active: bool) -> Result<(), ActionError> {
        let index = self.index_of(id)?;
        if let Some(rule) = self.rules.get_mut(index) {
            rule.active = active;
        }
        Ok(())
    }

    // === Reads ===

    #[must_use]
    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Rules in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Id the next installed rule will get.
    #[must_use]
    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Active rules listening for `trigger`, in firing order.
    #[must_use]
    pub fn matching(&self, trigger: &Trigger) -> Vec<&Rule> {
        let mut rules: Vec<&Rule> = self
            .rules
            .iter()
            .filter(|r| r.active && r.trigger.matches(trigger))
            .collect();
        // Stable: equal priorities keep declaration order.
        rules.sort_by_key(|r| r.priority);
        rules
    }

    fn index_of(&self, id: RuleId) -> Result<usize, ActionError> {
        self.rules
            .iter()
            .position(|r| r.id == id)
            .ok_or(ActionError::UnknownRule(id))
    }

    // === Evaluation ===

    /// Evaluate one trigger event and everything it cascades into.
    pub fn evaluate(
        &self,
        event: TriggerEvent,
        state: &mut GameState,
        rng: &mut GameRng,
    ) -> Vec<AppliedEffect> {
        self.evaluate_many([event], state, rng)
    }

    /// Evaluate several sibling events, in order, as one cascade.
    pub fn evaluate_many(
        &self,
        events: impl IntoIterator<Item = TriggerEvent>,
        state: &mut GameState,
        rng: &mut GameRng,
    ) -> Vec<AppliedEffect> {
        let max_depth = state.config.max_cascade_depth;
        let max_events = state.config.max_cascade_events;

        let mut queue: VecDeque<(TriggerEvent, u32)> =
            events.into_iter().map(|event| (event, 0)).collect();
        let mut processed = 0usize;
        let mut applied = Vec::new();

        while let Some((event, depth)) = queue.pop_front() {
            if state.is_finished() {
                break;
            }
            if processed >= max_events {
                warn!(
                    dropped = queue.len() + 1,
                    budget = max_events,
                    "cascade event budget exhausted"
                );
                break;
            }
            processed += 1;

            for rule in self.matching(&event.trigger) {
                if state.is_finished() {
                    break;
                }

                let passed = {
                    let ctx = ConditionContext::new(&event, state);
                    ConditionEvaluator::evaluate_all(&rule.conditions, rule.logic, &ctx, rng)
                };
                let (branch, effects) = if passed {
                    (RuleBranch::Then, &rule.effects)
                } else {
                    (RuleBranch::Else, &rule.else_effects)
                };
                if effects.is_empty() {
                    continue;
                }

                debug!(
                    rule = %rule.id,
                    player = %event.player,
                    trigger = event.trigger.name(),
                    ?branch,
                    "rule fired"
                );
                state.emit(GameEvent::RuleTriggered {
                    rule: rule.id,
                    player: event.player,
                    branch,
                });

                for effect in effects {
                    let resolution =
                        EffectResolver::resolve(effect, Some(rule.id), event.player, state, rng);
                    applied.extend(resolution.applied);

                    if resolution.triggers.is_empty() {
                        continue;
                    }
                    if depth >= max_depth {
                        warn!(
                            rule = %rule.id,
                            dropped = resolution.triggers.len(),
                            depth,
                            "cascade depth limit reached"
                        );
                        continue;
                    }
                    queue.extend(resolution.triggers.into_iter().map(|t| (t, depth + 1)));
                }
            }
        }

        applied
    }
}
