//! Heuristic action selection for bot seats.
//!
//! A bot never touches the game directly. It reads the game, returns a
//! [`Decision`], and the session submits the decision's action through the
//! same guard as a human's.

use tracing::trace;

use crate::board::{Direction, TileKind};
use crate::core::{Action, GameRng, GameState, Permission, PlayerId, TileId};
use crate::effects::{Effect, Modifier, ModifierKind, Target};
use crate::game::Game;
use crate::rules::Rule;
use crate::triggers::{CompareOp, Condition, MembershipOp, Observable, Trigger};
use crate::turn::Phase;

use super::analysis::{analyze, landing_value, Analysis, Standing};
use super::profile::{BotProfile, Difficulty};

/// An action a bot wants to take, with a short human-readable reason.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    pub action: Action,
    pub rationale: String,
}

impl Decision {
    fn new(action: Action, rationale: impl Into<String>) -> Self {
        Self {
            action,
            rationale: rationale.into(),
        }
    }

    fn pass(rationale: impl Into<String>) -> Self {
        Self::new(Action::EndTurn, rationale)
    }
}

/// A bot seat's decision maker.
#[derive(Clone, Debug, Default)]
pub struct BotPlayer {
    profile: BotProfile,
}

impl BotPlayer {
    #[must_use]
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_profile(BotProfile::for_difficulty(difficulty))
    }

    #[must_use]
    pub fn with_profile(profile: BotProfile) -> Self {
        Self { profile }
    }

    #[must_use]
    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }

    /// Pick an action for `player` in the current phase.
    ///
    /// `can_modify` is the guard's answer for whether a modification is
    /// allowed at all; individual permissions are checked here.
    pub fn decide(
        &self,
        player: PlayerId,
        game: &Game,
        can_modify: bool,
        rng: &mut GameRng,
    ) -> Decision {
        let decision = match game.phase() {
            Phase::Roll => Decision::new(Action::Roll, "rolling"),
            Phase::ChoosePath { options } => Self::choose_path(options.len(), rng),
            Phase::Modify => self.modify(player, game, can_modify, rng),
            Phase::Finished { .. } => Decision::pass("game is over"),
        };
        trace!(
            %player,
            action = decision.action.verb(),
            rationale = %decision.rationale,
            "bot decided"
        );
        decision
    }

    /// Pick a pending destination uniformly at random.
    ///
    /// Bot seats never reach this phase because the session picks for them
    /// when they roll; it serves callers that let a bot choose for a human
    /// seat.
    fn choose_path(options: usize, rng: &mut GameRng) -> Decision {
        if options == 0 {
            return Decision::pass("no destination to pick");
        }
        let option = rng.gen_range_usize(0..options);
        Decision::new(
            Action::ChooseDestination { option },
            "picking a destination at random",
        )
    }

    fn modify(
        &self,
        player: PlayerId,
        game: &Game,
        can_modify: bool,
        rng: &mut GameRng,
    ) -> Decision {
        if !can_modify {
            return Decision::pass("modification not allowed");
        }
        let rules_ok = game.can_modify(player, Permission::Rule);
        let tiles_ok = game.can_modify(player, Permission::Tile);
        if !rules_ok && !tiles_ok {
            return Decision::pass("every modification is switched off");
        }
        let state = game.state();

        if rng.gen_bool(self.profile.mistake_chance) {
            return random_modification(state, rules_ok, tiles_ok, rng);
        }
        if !rng.gen_bool(self.profile.modify_chance) {
            return Decision::pass("leaving the rules alone");
        }

        if rules_ok {
            let analysis = analyze(player, state, game.rules(), self.profile.consider_opponents);
            let (rule, rationale) = self.write_rule(&analysis, game, rng);
            return Decision::new(Action::CreateRule { rule }, rationale);
        }

        match grow_board(player, state, rng) {
            Some(action) => Decision::new(action, "growing the board"),
            None => Decision::pass("no room to grow the board"),
        }
    }

    fn write_rule(
        &self,
        analysis: &Analysis,
        game: &Game,
        rng: &mut GameRng,
    ) -> (Rule, &'static str) {
        let outlook = &analysis.outlook;
        if outlook.dangerous.len() > outlook.beneficial.len() {
            if let Some(rule) = safety_net(&outlook.dangerous, game) {
                return (rule, "dangerous tiles ahead, softening one");
            }
        }
        if !self.profile.consider_opponents {
            return (generic_rule(game.state(), rng), "writing a rule");
        }
        match analysis.standing {
            Standing::Trailing => (
                catch_up_rule(analysis, rng),
                "trailing, writing a catch-up rule",
            ),
            Standing::Leading => (
                defensive_rule(analysis, game, rng),
                "leading, protecting the lead",
            ),
            Standing::Even => (generic_rule(game.state(), rng), "even, writing a rule"),
        }
    }
}

/// A `Land` rule cancelling the loss on the worst dangerous tile.
fn safety_net(dangerous: &[TileId], game: &Game) -> Option<Rule> {
    let (tile, value) = dangerous
        .iter()
        .map(|&tile| (tile, landing_value(tile, game.rules())))
        .min_by_key(|&(tile, value)| (value, tile))?;
    let refund = value.checked_neg()?;
    Some(
        Rule::new("Safety net", Trigger::land(tile))
            .with_description(format!(
                "Landing on tile {} gives back {refund} points",
                tile.raw()
            ))
            .with_effect(Effect::score(refund)),
    )
}

fn catch_up_rule(analysis: &Analysis, rng: &mut GameRng) -> Rule {
    if !analysis.threats.is_empty() && rng.gen_bool(0.5) {
        return Rule::new("Brakes near the end", Trigger::NearVictory)
            .with_description("Whoever nears the end slows down")
            .with_effect(Effect::modifier(Modifier::Slow, 2));
    }
    if rng.gen_bool(0.5) {
        Rule::new("Underdog bonus", Trigger::TurnStart)
            .with_description("Anyone behind the leader gains 2 points")
            .with_condition(Condition::compare(Observable::Rank, CompareOp::Gt, 1))
            .with_effect(Effect::score(2))
    } else {
        Rule::new("Leader tax", Trigger::TurnEnd)
            .with_description("Each turn ends with a point taken from the leader")
            .with_effect(Effect::steal(1).on(Target::Leader))
    }
}

fn defensive_rule(analysis: &Analysis, game: &Game, rng: &mut GameRng) -> Rule {
    let has_finish = game
        .rules()
        .iter()
        .any(|r| r.trigger == Trigger::ReachEnd);
    if analysis.threats.is_empty() && !has_finish && rng.gen_bool(0.5) {
        return Rule::new("Finish line", Trigger::ReachEnd)
            .with_description("The first to reach an end tile wins")
            .with_effect(Effect::victory());
    }
    if rng.gen_bool(0.5) {
        Rule::new("Steady lead", Trigger::TurnStart)
            .with_description("The leader starts each turn shielded")
            .with_condition(Condition::compare(Observable::Rank, CompareOp::Eq, 1))
            .with_condition(Condition::has_effect(
                ModifierKind::Shield,
                MembershipOp::NotContains,
            ))
            .with_effect(Effect::shield(2))
    } else {
        Rule::new("Heavy feet", Trigger::TurnStart)
            .with_description("Anyone behind the leader rolls at half speed")
            .with_condition(Condition::compare(Observable::Rank, CompareOp::Gt, 1))
            .with_effect(Effect::modifier(Modifier::Slow, 1))
    }
}

fn generic_rule(state: &GameState, rng: &mut GameRng) -> Rule {
    match rng.gen_range_usize(0..3) {
        0 => Rule::new("Lucky roll", Trigger::dice(state.config.dice_sides))
            .with_description("Rolling the top face is worth a point")
            .with_effect(Effect::score(1)),
        1 => {
            let tiles: Vec<TileId> = state
                .board
                .tiles()
                .into_iter()
                .filter(|t| t.kind != TileKind::Start)
                .map(|t| t.id)
                .collect();
            match rng.choose(&tiles) {
                Some(&tile) => Rule::new("Lucky tile", Trigger::land(tile))
                    .with_description(format!("Landing on tile {} is worth 2 points", tile.raw()))
                    .with_effect(Effect::score(2)),
                None => Rule::new("Crowded tile", Trigger::SameTile { other: None })
                    .with_effect(Effect::move_by(-1)),
            }
        }
        _ => Rule::new("Crowded tile", Trigger::SameTile { other: None })
            .with_description("Sharing a tile pushes the newcomer back a step")
            .with_effect(Effect::move_by(-1)),
    }
}

/// Every free `(tile, direction)` slot on the board, in tile id order.
fn free_slots(state: &GameState) -> Vec<(TileId, Direction)> {
    let board = &state.board;
    board
        .tiles()
        .into_iter()
        .flat_map(|tile| {
            Direction::ALL
                .into_iter()
                .filter(move |&d| board.tile_at(tile.coord.offset(d)).is_none())
                .map(move |d| (tile.id, d))
        })
        .collect()
}

/// Add a tile next to the bot if there is room, anywhere otherwise.
fn grow_board(player: PlayerId, state: &GameState, rng: &mut GameRng) -> Option<Action> {
    let slots = free_slots(state);
    let here = state.position(player);
    let near: Vec<(TileId, Direction)> = slots
        .iter()
        .copied()
        .filter(|&(tile, _)| Some(tile) == here)
        .collect();
    let pool = if near.is_empty() { &slots } else { &near };
    rng.choose(pool)
        .map(|&(from, direction)| Action::add_tile(from, direction))
}

fn random_modification(
    state: &GameState,
    rules_ok: bool,
    tiles_ok: bool,
    rng: &mut GameRng,
) -> Decision {
    let mut choices = vec![Decision::pass("passing on a whim")];
    if rules_ok {
        choices.push(Decision::new(
            Action::CreateRule {
                rule: generic_rule(state, rng),
            },
            "writing a rule on a whim",
        ));
    }
    if tiles_ok {
        let slots = free_slots(state);
        if let Some(&(from, direction)) = rng.choose(&slots) {
            choices.push(Decision::new(
                Action::add_tile(from, direction),
                "adding a tile on a whim",
            ));
        }
    }
    let pick = rng.gen_range_usize(0..choices.len());
    choices.swap_remove(pick)
}
