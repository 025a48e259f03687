//! Bot difficulty and tuning parameters.

use serde::{Deserialize, Serialize};

/// Difficulty tier of a bot seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Tuning parameters for a bot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotProfile {
    /// Chance that a decision short-circuits to a purely random legal action.
    pub mistake_chance: f64,

    /// Chance of attempting a modification at all when one is allowed.
    pub modify_chance: f64,

    /// Whether opponents' positions and scores shape the decision.
    /// Without it the bot always writes generic rules.
    pub consider_opponents: bool,
}

impl BotProfile {
    /// The preset for a difficulty tier.
    #[must_use]
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Self {
                mistake_chance: 0.3,
                modify_chance: 0.3,
                consider_opponents: false,
            },
            Difficulty::Medium => Self {
                mistake_chance: 0.15,
                modify_chance: 0.5,
                consider_opponents: true,
            },
            Difficulty::Hard => Self {
                mistake_chance: 0.05,
                modify_chance: 0.8,
                consider_opponents: true,
            },
        }
    }

    /// Set the mistake chance.
    #[must_use]
    pub fn with_mistake_chance(mut self, chance: f64) -> Self {
        self.mistake_chance = chance;
        self
    }

    /// Set the modification chance.
    #[must_use]
    pub fn with_modify_chance(mut self, chance: f64) -> Self {
        self.modify_chance = chance;
        self
    }

    #[must_use]
    pub fn with_consider_opponents(mut self, consider: bool) -> Self {
        self.consider_opponents = consider;
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::default())
    }
}
