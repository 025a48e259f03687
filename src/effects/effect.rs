//! Effect definitions.
//!
//! Effects are the closed vocabulary rules can apply. Each one pairs an
//! [`EffectKind`] (what happens) with a [`Target`] (to whom).
//!
//! ## Movement
//!
//! - `Move`: walk relative to the current tile, negative is backwards
//! - `Teleport`, `ReturnToStart`, `SwapPositions`
//!
//! ## Turn order
//!
//! - `SkipTurn`, `ExtraTurn`
//!
//! ## Score
//!
//! - `ModifyScore`, `StealPoints`
//!
//! ## Temporary modifiers
//!
//! - `ApplyModifier`: the only effect with a duration, kept in the ledger
//!
//! ## Meta
//!
//! - `CopyLastEffect`, `ReverseLastEffect`: act on the last concrete effect
//! - `DeclareVictory`: the only way a game ends
//! - `SetPermission`: flip a global modification switch

use serde::{Deserialize, Serialize};

use crate::core::{Permission, PlayerId, RuleId, TileId};

/// Temporary modifier carried by a player for a number of turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    /// Blocks harmful effects.
    Shield,
    /// Doubles dice results.
    DoubleDice,
    /// Adds the configured bonus to dice results.
    SpeedBoost,
    /// Halves dice results, rounding down, minimum 1.
    Slow,
    /// Hidden from targeting by others and from proximity triggers.
    Invisibility,
    /// Raises the die's lowest face.
    DiceMin { value: u32 },
    /// Lowers the die's highest face.
    DiceMax { value: u32 },
}

/// The variant of a [`Modifier`] without its payload. Two modifiers of the
/// same kind stack according to the configured policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ModifierKind {
    Shield,
    DoubleDice,
    SpeedBoost,
    Slow,
    Invisibility,
    DiceMin,
    DiceMax,
}

impl Modifier {
    #[must_use]
    pub fn kind(&self) -> ModifierKind {
        match self {
            Modifier::Shield => ModifierKind::Shield,
            Modifier::DoubleDice => ModifierKind::DoubleDice,
            Modifier::SpeedBoost => ModifierKind::SpeedBoost,
            Modifier::Slow => ModifierKind::Slow,
            Modifier::Invisibility => ModifierKind::Invisibility,
            Modifier::DiceMin { .. } => ModifierKind::DiceMin,
            Modifier::DiceMax { .. } => ModifierKind::DiceMax,
        }
    }

    /// Whether a shield keeps this modifier off its holder.
    #[must_use]
    pub fn is_harmful(&self) -> bool {
        matches!(self, Modifier::Slow | Modifier::DiceMax { .. })
    }
}

impl std::fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ModifierKind::Shield => "shield",
            ModifierKind::DoubleDice => "double dice",
            ModifierKind::SpeedBoost => "speed boost",
            ModifierKind::Slow => "slow",
            ModifierKind::Invisibility => "invisibility",
            ModifierKind::DiceMin => "dice minimum",
            ModifierKind::DiceMax => "dice maximum",
        };
        f.write_str(name)
    }
}

/// What an effect does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    Move { steps: i32 },
    Teleport { tile: TileId },
    ReturnToStart,
    SkipTurn { turns: u32 },
    ExtraTurn,
    ModifyScore { delta: i64 },
    /// The triggering player takes up to `amount` points from each target.
    StealPoints { amount: i64 },
    /// The triggering player trades tiles with each target in turn.
    SwapPositions,
    ApplyModifier { modifier: Modifier, duration: u32 },
    CopyLastEffect,
    ReverseLastEffect,
    /// The first target wins.
    DeclareVictory,
    SetPermission { permission: Permission, allowed: bool },
}

impl EffectKind {
    /// Whether a shield on the recipient blocks this effect.
    #[must_use]
    pub fn is_harmful(&self) -> bool {
        match self {
            EffectKind::Move { steps } => *steps < 0,
            EffectKind::ModifyScore { delta } => *delta < 0,
            EffectKind::ApplyModifier { modifier, .. } => modifier.is_harmful(),
            EffectKind::Teleport { .. }
            | EffectKind::ReturnToStart
            | EffectKind::SkipTurn { .. }
            | EffectKind::StealPoints { .. }
            | EffectKind::SwapPositions => true,
            EffectKind::ExtraTurn
            | EffectKind::CopyLastEffect
            | EffectKind::ReverseLastEffect
            | EffectKind::DeclareVictory
            | EffectKind::SetPermission { .. } => false,
        }
    }

    /// Whether this effect stands for another one and is resolved through the
    /// last-effect record.
    #[must_use]
    pub fn is_meta(&self) -> bool {
        matches!(self, EffectKind::CopyLastEffect | EffectKind::ReverseLastEffect)
    }

    /// The effect that undoes this one, where one exists.
    #[must_use]
    pub fn inverse(&self) -> Option<EffectKind> {
        match self {
            EffectKind::Move { steps } => Some(EffectKind::Move {
                steps: steps.saturating_neg(),
            }),
            EffectKind::ModifyScore { delta } => Some(EffectKind::ModifyScore {
                delta: delta.saturating_neg(),
            }),
            EffectKind::StealPoints { amount } => Some(EffectKind::StealPoints {
                amount: amount.saturating_neg(),
            }),
            _ => None,
        }
    }
}

/// Who an effect applies to, relative to the triggering player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// The triggering player.
    #[default]
    Self_,
    /// Every visible player.
    All,
    /// Every visible player except the triggering one.
    Others,
    /// One visible player drawn from the game RNG.
    Random,
    /// Highest score. Ties go to the lowest seat.
    Leader,
    /// Lowest score. Ties go to the lowest seat.
    Last,
}

/// An effect with its target selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Effect {
    pub kind: EffectKind,
    pub target: Target,
}

impl Effect {
    /// An effect on the triggering player.
    #[must_use]
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            target: Target::Self_,
        }
    }

    /// Set the target (builder pattern).
    #[must_use]
    pub fn on(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    // === Convenience constructors ===

    #[must_use]
    pub fn score(delta: i64) -> Self {
        Self::new(EffectKind::ModifyScore { delta })
    }

    #[must_use]
    pub fn move_by(steps: i32) -> Self {
        Self::new(EffectKind::Move { steps })
    }

    #[must_use]
    pub fn teleport(tile: TileId) -> Self {
        Self::new(EffectKind::Teleport { tile })
    }

    #[must_use]
    pub fn steal(amount: i64) -> Self {
        Self::new(EffectKind::StealPoints { amount })
    }

    #[must_use]
    pub fn skip_turn(turns: u32) -> Self {
        Self::new(EffectKind::SkipTurn { turns })
    }

    #[must_use]
    pub fn modifier(modifier: Modifier, duration: u32) -> Self {
        Self::new(EffectKind::ApplyModifier { modifier, duration })
    }

    #[must_use]
    pub fn shield(duration: u32) -> Self {
        Self::modifier(Modifier::Shield, duration)
    }

    #[must_use]
    pub fn victory() -> Self {
        Self::new(EffectKind::DeclareVictory)
    }
}

/// How one application of an effect to one player turned out.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectOutcome {
    /// State changed.
    Applied,
    /// The recipient's shield stopped it.
    Blocked,
    /// Valid but changed nothing (no legal walk, nothing to copy, ...).
    NoOp(String),
}

/// Record of an effect the resolver acted on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedEffect {
    /// Rule that produced it, `None` for system-issued effects.
    pub rule: Option<RuleId>,
    /// The triggering player.
    pub actor: PlayerId,
    /// The player the effect landed on.
    pub recipient: PlayerId,
    /// The concrete effect, after copy and reverse have been resolved.
    pub kind: EffectKind,
    pub outcome: EffectOutcome,
}

impl AppliedEffect {
    #[must_use]
    pub fn was_applied(&self) -> bool {
        self.outcome == EffectOutcome::Applied
    }
}

/// The most recent concrete effect, kept for copy and reverse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastEffect {
    pub kind: EffectKind,
    pub actor: PlayerId,
    pub recipient: PlayerId,
}
