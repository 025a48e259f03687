//! Rule definitions.
//!
//! A rule is a trigger, optional conditions and two effect lists: the
//! effects that run when the conditions pass and the else-effects that run
//! when they fail. Rules are built with the `with_*` methods and installed
//! through the [`RuleEngine`](super::RuleEngine), which assigns the id.

use serde::{Deserialize, Serialize};

use crate::board::BoardGraph;
use crate::core::{MalformedRule, PlayerId, RuleId};
use crate::effects::{Effect, EffectKind};
use crate::triggers::{Condition, LogicMode, Trigger};

/// Which effect list a firing rule ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleBranch {
    /// Conditions passed.
    Then,
    /// Conditions failed and the rule has else-effects.
    Else,
}

/// A player-authored rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Assigned on install. Zero until then.
    pub id: RuleId,
    pub title: String,
    pub description: String,
    pub trigger: Trigger,
    pub conditions: Vec<Condition>,
    pub logic: LogicMode,
    pub effects: Vec<Effect>,
    /// Empty means no else branch.
    pub else_effects: Vec<Effect>,
    /// Lower values fire first.
    pub priority: i32,
    pub active: bool,
    /// `None` for rules installed by the host application.
    pub author: Option<PlayerId>,
}

impl Rule {
    /// An active rule with no conditions and no effects yet.
    #[must_use]
    pub fn new(title: impl Into<String>, trigger: Trigger) -> Self {
        Self {
            id: RuleId::new(0),
            title: title.into(),
            description: String::new(),
            trigger,
            conditions: Vec::new(),
            logic: LogicMode::And,
            effects: Vec::new(),
            else_effects: Vec::new(),
            priority: 0,
            active: true,
            author: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a condition.
    #[must_use]
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    #[must_use]
    pub fn with_logic(mut self, logic: LogicMode) -> Self {
        self.logic = logic;
        self
    }

    /// Add an effect to run when the conditions pass.
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add an effect to run when the conditions fail.
    #[must_use]
    pub fn with_else_effect(mut self, effect: Effect) -> Self {
        self.else_effects.push(effect);
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    #[must_use]
    pub fn with_author(mut self, author: PlayerId) -> Self {
        self.author = Some(author);
        self
    }

    /// Every effect of both branches.
    pub fn all_effects(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter().chain(self.else_effects.iter())
    }

    /// Checks that do not depend on the board.
    pub fn validate_shape(&self) -> Result<(), MalformedRule> {
        if self.title.trim().is_empty() {
            return Err(MalformedRule::MissingTitle);
        }
        if self.effects.is_empty() {
            return Err(MalformedRule::EmptyEffects);
        }
        for effect in self.all_effects() {
            match effect.kind {
                EffectKind::ApplyModifier { duration: 0, .. } => {
                    return Err(MalformedRule::ZeroDuration)
                }
                EffectKind::SkipTurn { turns: 0 } => return Err(MalformedRule::ZeroSkipTurns),
                _ => {}
            }
        }
        Ok(())
    }

    /// Full validation at creation time.
    ///
    /// Tile references must exist on `board` and a dice trigger value must
    /// be reachable within `1..=max_roll`.
    pub fn validate(&self, board: &BoardGraph, max_roll: u32) -> Result<(), MalformedRule> {
        self.validate_shape()?;

        if let Some(tile) = self.trigger.tile() {
            if !board.contains(tile) {
                return Err(MalformedRule::UnknownTile(tile));
            }
        }
        if let Trigger::DiceRoll { value: Some(value) } = self.trigger {
            if value == 0 || value > max_roll {
                return Err(MalformedRule::DiceValueOutOfRange {
                    value,
                    max: max_roll,
                });
            }
        }
        for effect in self.all_effects() {
            if let EffectKind::Teleport { tile } = effect.kind {
                if !board.contains(tile) {
                    return Err(MalformedRule::UnknownTile(tile));
                }
            }
        }
        Ok(())
    }
}
