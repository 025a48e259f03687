//! Trigger vocabulary and the events the engine raises.
//!
//! A rule listens for one [`Trigger`]. Some variants carry an optional value;
//! when a rule's trigger declares one, only events carrying the same value
//! match. An event's own `Trigger` always carries the concrete value.

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, TileId};
use crate::effects::ModifierKind;

/// What a rule reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// After a roll, with the final value.
    DiceRoll { value: Option<u32> },
    /// Ending a movement on a tile.
    Land { tile: Option<TileId> },
    /// Moving across a tile without stopping.
    PassOver { tile: Option<TileId> },
    TurnStart,
    TurnEnd,
    /// A player's score changed by `delta`.
    ScoreChange { delta: Option<i64> },
    /// A player crossed the halfway point of the start-to-end route.
    HalfBoard,
    /// A player came within the near-victory distance of an end tile.
    NearVictory,
    /// A player landed on an end tile.
    ReachEnd,
    EffectApplied { modifier: Option<ModifierKind> },
    EffectExpired { modifier: Option<ModifierKind> },
    /// Ending a movement on a tile another visible player occupies.
    SameTile { other: Option<PlayerId> },
    /// Moving past another visible player toward the end.
    Overtake { other: Option<PlayerId> },
}

impl Trigger {
    #[must_use]
    pub fn dice(value: u32) -> Self {
        Trigger::DiceRoll { value: Some(value) }
    }

    #[must_use]
    pub fn land(tile: TileId) -> Self {
        Trigger::Land { tile: Some(tile) }
    }

    #[must_use]
    pub fn pass_over(tile: TileId) -> Self {
        Trigger::PassOver { tile: Some(tile) }
    }

    /// Whether a rule listening for `self` fires on an event carrying `event`.
    ///
    /// Variants must agree; a value declared by the rule must equal the
    /// event's.
    #[must_use]
    pub fn matches(&self, event: &Trigger) -> bool {
        fn agree<T: PartialEq>(declared: &Option<T>, actual: &Option<T>) -> bool {
            match declared {
                None => true,
                Some(_) => declared == actual,
            }
        }

        match (self, event) {
            (Trigger::DiceRoll { value: a }, Trigger::DiceRoll { value: b }) => agree(a, b),
            (Trigger::Land { tile: a }, Trigger::Land { tile: b }) => agree(a, b),
            (Trigger::PassOver { tile: a }, Trigger::PassOver { tile: b }) => agree(a, b),
            (Trigger::ScoreChange { delta: a }, Trigger::ScoreChange { delta: b }) => agree(a, b),
            (Trigger::EffectApplied { modifier: a }, Trigger::EffectApplied { modifier: b }) => {
                agree(a, b)
            }
            (Trigger::EffectExpired { modifier: a }, Trigger::EffectExpired { modifier: b }) => {
                agree(a, b)
            }
            (Trigger::SameTile { other: a }, Trigger::SameTile { other: b }) => agree(a, b),
            (Trigger::Overtake { other: a }, Trigger::Overtake { other: b }) => agree(a, b),
            (Trigger::TurnStart, Trigger::TurnStart)
            | (Trigger::TurnEnd, Trigger::TurnEnd)
            | (Trigger::HalfBoard, Trigger::HalfBoard)
            | (Trigger::NearVictory, Trigger::NearVictory)
            | (Trigger::ReachEnd, Trigger::ReachEnd) => true,
            _ => false,
        }
    }

    /// The tile this trigger refers to, if any.
    #[must_use]
    pub fn tile(&self) -> Option<TileId> {
        match self {
            Trigger::Land { tile } | Trigger::PassOver { tile } => *tile,
            _ => None,
        }
    }

    /// Stable name used in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Trigger::DiceRoll { .. } => "dice_roll",
            Trigger::Land { .. } => "land",
            Trigger::PassOver { .. } => "pass_over",
            Trigger::TurnStart => "turn_start",
            Trigger::TurnEnd => "turn_end",
            Trigger::ScoreChange { .. } => "score_change",
            Trigger::HalfBoard => "half_board",
            Trigger::NearVictory => "near_victory",
            Trigger::ReachEnd => "reach_end",
            Trigger::EffectApplied { .. } => "effect_applied",
            Trigger::EffectExpired { .. } => "effect_expired",
            Trigger::SameTile { .. } => "same_tile",
            Trigger::Overtake { .. } => "overtake",
        }
    }
}

/// A trigger that happened to a player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriggerEvent {
    pub trigger: Trigger,
    /// The player the event happened to. Rules resolve `Target::Self_`
    /// against this player.
    pub player: PlayerId,
}

impl TriggerEvent {
    #[must_use]
    pub fn new(trigger: Trigger, player: PlayerId) -> Self {
        Self { trigger, player }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_matches_any_value() {
        let rule = Trigger::DiceRoll { value: None };
        assert!(rule.matches(&Trigger::dice(3)));
        assert!(rule.matches(&Trigger::dice(6)));
    }

    #[test]
    fn test_declared_value_must_agree() {
        let rule = Trigger::land(TileId::new(4));
        assert!(rule.matches(&Trigger::land(TileId::new(4))));
        assert!(!rule.matches(&Trigger::land(TileId::new(5))));
    }

    #[test]
    fn test_variants_must_agree() {
        assert!(!Trigger::land(TileId::new(4)).matches(&Trigger::pass_over(TileId::new(4))));
        assert!(Trigger::TurnStart.matches(&Trigger::TurnStart));
        assert!(!Trigger::TurnStart.matches(&Trigger::TurnEnd));
    }

    #[test]
    fn test_effect_triggers() {
        let rule = Trigger::EffectExpired {
            modifier: Some(ModifierKind::Shield),
        };
        assert!(rule.matches(&Trigger::EffectExpired {
            modifier: Some(ModifierKind::Shield)
        }));
        assert!(!rule.matches(&Trigger::EffectApplied {
            modifier: Some(ModifierKind::Shield)
        }));
    }

    #[test]
    fn test_trigger_serialization() {
        let trigger = Trigger::Overtake {
            other: Some(PlayerId::new(2)),
        };
        let json = serde_json::to_string(&trigger).unwrap();
        let deserialized: Trigger = serde_json::from_str(&json).unwrap();
        assert_eq!(trigger, deserialized);
    }
}
