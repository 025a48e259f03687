//! Reading the board from one bot's point of view.
//!
//! The analysis is read-only: it looks at the game state and the rule set
//! and never mutates either.

use crate::board::PathResolver;
use crate::core::{GameState, PlayerId, PlayerSet, TileId};
use crate::effects::{Effect, EffectKind, Target};
use crate::rules::RuleEngine;
use crate::triggers::Trigger;

/// Opponents this close to an end tile, and no farther than the bot, count
/// as threats.
pub const THREAT_DISTANCE: u32 = 3;

/// Score standing against the best opponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Standing {
    Leading,
    Trailing,
    Even,
}

/// Tiles within one roll that carry `Land` rules, sorted by their value to
/// whoever lands there.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileOutlook {
    pub dangerous: Vec<TileId>,
    pub beneficial: Vec<TileId>,
}

impl TileOutlook {
    /// Net value of landing on `tile`: positive, negative or zero.
    #[must_use]
    pub fn rating(&self, tile: TileId) -> i32 {
        if self.beneficial.contains(&tile) {
            1
        } else if self.dangerous.contains(&tile) {
            -1
        } else {
            0
        }
    }
}

/// What a bot knows about its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    pub standing: Standing,
    pub threats: PlayerSet,
    pub outlook: TileOutlook,
    /// Hops from the bot to the nearest end tile.
    pub distance_to_end: Option<u32>,
}

/// Analyse the game for `player`.
///
/// Without `consider_opponents`, standing is always `Even` and no threats
/// are reported.
#[must_use]
pub fn analyze(
    player: PlayerId,
    state: &GameState,
    rules: &RuleEngine,
    consider_opponents: bool,
) -> Analysis {
    let position = state.position(player);
    let distance_to_end = position.and_then(|tile| state.board.distance_to_end(tile));

    let (standing, threats) = if consider_opponents {
        (
            standing(player, state),
            threats(player, state, distance_to_end),
        )
    } else {
        (Standing::Even, PlayerSet::new())
    };

    let outlook = position
        .map(|tile| outlook(tile, state, rules))
        .unwrap_or_default();

    Analysis {
        standing,
        threats,
        outlook,
        distance_to_end,
    }
}

fn standing(player: PlayerId, state: &GameState) -> Standing {
    let Some(mine) = state.score(player) else {
        return Standing::Even;
    };
    let best_other = state
        .players
        .values()
        .filter(|p| p.id != player)
        .map(|p| p.score)
        .max();

    match best_other {
        Some(best) if mine > best => Standing::Leading,
        Some(best) if mine < best => Standing::Trailing,
        _ => Standing::Even,
    }
}

fn threats(player: PlayerId, state: &GameState, mine: Option<u32>) -> PlayerSet {
    state
        .visible_players()
        .into_iter()
        .filter(|&p| p != player)
        .filter(|&p| {
            let theirs = state
                .position(p)
                .and_then(|tile| state.board.distance_to_end(tile));
            match (theirs, mine) {
                (Some(theirs), Some(mine)) => theirs <= THREAT_DISTANCE && theirs <= mine,
                (Some(theirs), None) => theirs <= THREAT_DISTANCE,
                (None, _) => false,
            }
        })
        .collect()
}

fn outlook(from: TileId, state: &GameState, rules: &RuleEngine) -> TileOutlook {
    let mut outlook = TileOutlook::default();
    let reach = PathResolver::reach(&state.board, from, state.config.dice_sides);

    for (tile, _) in reach {
        let value = landing_value(tile, rules);
        if value > 0 {
            outlook.beneficial.push(tile);
        } else if value < 0 {
            outlook.dangerous.push(tile);
        }
    }
    outlook
}

/// Net value of the active `Land` rules on `tile` for whoever lands there.
#[must_use]
pub fn landing_value(tile: TileId, rules: &RuleEngine) -> i64 {
    rules
        .iter()
        .filter(|r| r.active && r.trigger == Trigger::land(tile))
        .flat_map(|r| r.effects.iter())
        .map(lander_value)
        .sum()
}

/// Rough value of an effect for the player who triggered it.
fn lander_value(effect: &Effect) -> i64 {
    if !matches!(effect.target, Target::Self_ | Target::All) {
        return 0;
    }
    match effect.kind {
        EffectKind::ModifyScore { delta } => delta,
        EffectKind::Move { steps } => i64::from(steps.signum()) * 2,
        EffectKind::ReturnToStart => -5,
        EffectKind::SkipTurn { turns } => -3 * i64::from(turns),
        EffectKind::ExtraTurn => 3,
        EffectKind::ApplyModifier { modifier, .. } => {
            if modifier.is_harmful() {
                -2
            } else {
                2
            }
        }
        EffectKind::DeclareVictory => 100,
        EffectKind::Teleport { .. }
        | EffectKind::StealPoints { .. }
        | EffectKind::SwapPositions
        | EffectKind::CopyLastEffect
        | EffectKind::ReverseLastEffect
        | EffectKind::SetPermission { .. } => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PlayerSetup};
    use crate::rules::Rule;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn state() -> GameState {
        GameState::new(
            GameConfig::default(),
            &[PlayerSetup::human("A"), PlayerSetup::human("B")],
        )
    }

    #[test]
    fn test_standing() {
        let mut state = state();
        let rules = RuleEngine::new();
        assert_eq!(analyze(P0, &state, &rules, true).standing, Standing::Even);

        state.players[P0].score = 3;
        assert_eq!(analyze(P0, &state, &rules, true).standing, Standing::Leading);
        assert_eq!(analyze(P1, &state, &rules, true).standing, Standing::Trailing);
        assert_eq!(analyze(P1, &state, &rules, false).standing, Standing::Even);
    }

    #[test]
    fn test_threats() {
        let mut state = state();
        let rules = RuleEngine::new();
        state.players[P1].position = TileId::new(7);

        let analysis = analyze(P0, &state, &rules, true);
        assert_eq!(analysis.threats.as_slice(), &[P1]);
        assert_eq!(analysis.distance_to_end, Some(9));

        // Behind the bot, no threat.
        state.players[P0].position = TileId::new(8);
        assert!(analyze(P0, &state, &rules, true).threats.is_empty());
    }

    #[test]
    fn test_outlook_reads_land_rules() {
        let state = state();
        let mut rules = RuleEngine::new();
        rules
            .add(
                Rule::new("Trap", Trigger::land(TileId::new(3))).with_effect(Effect::score(-4)),
                &state,
            )
            .unwrap();
        rules
            .add(
                Rule::new("Gift", Trigger::land(TileId::new(5)))
                    .with_effect(Effect::new(EffectKind::ExtraTurn)),
                &state,
            )
            .unwrap();
        rules
            .add(
                Rule::new("Far", Trigger::land(TileId::new(8))).with_effect(Effect::score(9)),
                &state,
            )
            .unwrap();

        let outlook = analyze(P0, &state, &rules, false).outlook;
        assert_eq!(outlook.dangerous, vec![TileId::new(3)]);
        // Tile 8 is out of reach of a six-sided die.
        assert_eq!(outlook.beneficial, vec![TileId::new(5)]);
        assert_eq!(outlook.rating(TileId::new(5)), 1);
        assert_eq!(outlook.rating(TileId::new(3)), -1);
        assert_eq!(outlook.rating(TileId::new(4)), 0);
        assert_eq!(landing_value(TileId::new(3), &rules), -4);
        assert_eq!(landing_value(TileId::new(8), &rules), 9);
    }
}
