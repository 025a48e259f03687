//! Effect resolution - executing effects on game state.
//!
//! The `EffectResolver` applies one [`Effect`] for a triggering player: it
//! resolves the target selector, checks shields, mutates the state and
//! collects the trigger events the change raises. Those events are handed
//! back to the rule engine, which evaluates them as a cascade.

use tracing::debug;

use crate::board::{Path, PathResolver};
use crate::core::{GameRng, GameState, PlayerId, RuleId};
use crate::game::GameEvent;
use crate::triggers::{Trigger, TriggerEvent};

use super::effect::{AppliedEffect, Effect, EffectKind, EffectOutcome, LastEffect};
use super::ledger::EffectSource;
use super::targeting;

/// What resolving one effect did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    /// One record per recipient, in target order.
    pub applied: Vec<AppliedEffect>,
    /// Derived trigger events, in the order they happened.
    pub triggers: Vec<TriggerEvent>,
}

impl Resolution {
    fn record(
        &mut self,
        rule: Option<RuleId>,
        actor: PlayerId,
        recipient: PlayerId,
        kind: EffectKind,
        outcome: EffectOutcome,
    ) {
        self.applied.push(AppliedEffect {
            rule,
            actor,
            recipient,
            kind,
            outcome,
        });
    }

    fn noop(
        &mut self,
        rule: Option<RuleId>,
        actor: PlayerId,
        recipient: PlayerId,
        kind: EffectKind,
        reason: &str,
    ) {
        self.record(rule, actor, recipient, kind, EffectOutcome::NoOp(reason.to_string()));
    }
}

/// Resolves effects on game state.
pub struct EffectResolver;

impl EffectResolver {
    /// Apply `effect` on behalf of `actor`.
    ///
    /// `rule` is the rule that produced the effect, `None` for system-issued
    /// effects. Randomness (`Random` targets) is drawn from `rng`.
    pub fn resolve(
        effect: &Effect,
        rule: Option<RuleId>,
        actor: PlayerId,
        state: &mut GameState,
        rng: &mut GameRng,
    ) -> Resolution {
        let mut resolution = Resolution::default();

        match effect.kind {
            EffectKind::CopyLastEffect => match state.last_effect {
                Some(last) => {
                    for recipient in targeting::resolve(effect.target, actor, state, rng) {
                        Self::apply_to(last.kind, rule, actor, recipient, state, &mut resolution);
                    }
                }
                None => resolution.noop(rule, actor, actor, effect.kind, "no effect to copy"),
            },
            EffectKind::ReverseLastEffect => {
                match state.last_effect.and_then(|last| Some((last, last.kind.inverse()?))) {
                    Some((last, inverse)) => Self::apply_to(
                        inverse,
                        rule,
                        last.actor,
                        last.recipient,
                        state,
                        &mut resolution,
                    ),
                    None => resolution.noop(rule, actor, actor, effect.kind, "nothing to reverse"),
                }
            }
            EffectKind::DeclareVictory => {
                Self::declare_victory(effect, rule, actor, state, rng, &mut resolution);
            }
            EffectKind::SetPermission {
                permission,
                allowed,
            } => {
                if state.permissions.allows(permission) == allowed {
                    resolution.noop(rule, actor, actor, effect.kind, "permission unchanged");
                } else {
                    state.permissions.set(permission, allowed);
                    state.emit(GameEvent::PermissionChanged {
                        permission,
                        allowed,
                    });
                    resolution.record(rule, actor, actor, effect.kind, EffectOutcome::Applied);
                }
            }
            kind => {
                for recipient in targeting::resolve(effect.target, actor, state, rng) {
                    Self::apply_to(kind, rule, actor, recipient, state, &mut resolution);
                }
            }
        }

        resolution
    }

    fn declare_victory(
        effect: &Effect,
        rule: Option<RuleId>,
        actor: PlayerId,
        state: &mut GameState,
        rng: &mut GameRng,
        resolution: &mut Resolution,
    ) {
        if state.is_finished() {
            resolution.noop(rule, actor, actor, effect.kind, "game already over");
            return;
        }
        let targets = targeting::resolve(effect.target, actor, state, rng);
        let Some(&winner) = targets.first() else {
            resolution.noop(rule, actor, actor, effect.kind, "no one to declare");
            return;
        };

        state.cursor.phase = crate::turn::Phase::Finished { winner };
        state.emit(GameEvent::GameOver { winner });
        tracing::info!(%winner, ?rule, "game over");
        resolution.record(rule, actor, winner, effect.kind, EffectOutcome::Applied);
    }

    /// Apply a concrete per-player effect to one recipient.
    fn apply_to(
        kind: EffectKind,
        rule: Option<RuleId>,
        actor: PlayerId,
        recipient: PlayerId,
        state: &mut GameState,
        resolution: &mut Resolution,
    ) {
        if !state.players.contains(recipient) || !state.players.contains(actor) {
            return;
        }

        if kind.is_harmful() && state.is_shielded(recipient) {
            debug!(%recipient, ?kind, ?rule, "effect blocked by shield");
            state.emit(GameEvent::EffectBlocked {
                rule,
                player: recipient,
                effect: kind,
            });
            resolution.record(rule, actor, recipient, kind, EffectOutcome::Blocked);
            return;
        }

        let outcome = match kind {
            EffectKind::Move { steps } => Self::walk(recipient, steps, state, resolution),
            EffectKind::Teleport { tile } => {
                if !state.board.contains(tile) {
                    Err("tile no longer exists")
                } else if state.players[recipient].position == tile {
                    Err("already there")
                } else {
                    resolution.triggers.extend(state.jump(recipient, tile));
                    Ok(())
                }
            }
            EffectKind::ReturnToStart => {
                let start = state.board.start();
                if state.players[recipient].position == start {
                    Err("already at start")
                } else {
                    resolution.triggers.extend(state.jump(recipient, start));
                    Ok(())
                }
            }
            EffectKind::SkipTurn { turns } => {
                let player = &mut state.players[recipient];
                player.skip_turns = player.skip_turns.saturating_add(turns);
                Ok(())
            }
            EffectKind::ExtraTurn => {
                let player = &mut state.players[recipient];
                player.extra_turns = player.extra_turns.saturating_add(1);
                Ok(())
            }
            EffectKind::ModifyScore { delta } => {
                if delta == 0 {
                    Err("zero delta")
                } else {
                    Self::change_score(recipient, delta, state, resolution);
                    Ok(())
                }
            }
            EffectKind::StealPoints { amount } => {
                Self::steal(actor, recipient, amount, state, resolution)
            }
            EffectKind::SwapPositions => {
                let mine = state.players[actor].position;
                let theirs = state.players[recipient].position;
                if recipient == actor || mine == theirs {
                    Err("nothing to swap")
                } else {
                    resolution.triggers.extend(state.jump(actor, theirs));
                    resolution.triggers.extend(state.jump(recipient, mine));
                    Ok(())
                }
            }
            EffectKind::ApplyModifier { modifier, duration } => {
                let source = rule.map_or(EffectSource::System, EffectSource::Rule);
                let turn = state.cursor.turn_number;
                let outcome = state
                    .ledger
                    .apply(recipient, modifier, duration, source, turn);
                if outcome.changed() {
                    state.emit(GameEvent::EffectApplied {
                        rule,
                        player: recipient,
                        modifier,
                        duration,
                        outcome,
                    });
                    resolution.triggers.push(TriggerEvent::new(
                        Trigger::EffectApplied {
                            modifier: Some(modifier.kind()),
                        },
                        recipient,
                    ));
                    Ok(())
                } else {
                    Err("modifier already active")
                }
            }
            EffectKind::CopyLastEffect
            | EffectKind::ReverseLastEffect
            | EffectKind::DeclareVictory
            | EffectKind::SetPermission { .. } => Err("not a player effect"),
        };

        match outcome {
            Ok(()) => {
                state.last_effect = Some(LastEffect {
                    kind,
                    actor,
                    recipient,
                });
                resolution.record(rule, actor, recipient, kind, EffectOutcome::Applied);
            }
            Err(reason) => resolution.noop(rule, actor, recipient, kind, reason),
        }
    }

    /// Relative move. Forward walks must end closer to an end tile and pick
    /// the nearest; backward walks must end farther away and pick the
    /// farthest. With no such walk of the full length, shorter walks are
    /// tried. Off any route to an end, the first walk found is taken.
    fn walk(
        player: PlayerId,
        steps: i32,
        state: &mut GameState,
        resolution: &mut Resolution,
    ) -> Result<(), &'static str> {
        if steps == 0 {
            return Err("zero steps");
        }
        let from = state.players[player].position;
        let board = &state.board;
        let here = board.distance_to_end(from);
        let to_end = |p: &Path| board.distance_to_end(p.destination());

        let path = (1..=steps.unsigned_abs()).rev().find_map(|len| {
            let options = PathResolver::destinations(board, from, len);
            match here {
                None => options.into_iter().next(),
                Some(here) if steps > 0 => options
                    .into_iter()
                    .filter(|p| to_end(p).is_some_and(|d| d < here))
                    .min_by_key(|p| to_end(p)),
                Some(here) => options
                    .into_iter()
                    .filter(|p| to_end(p).map_or(true, |d| d > here))
                    .max_by_key(|p| to_end(p)),
            }
        });

        match path {
            Some(path) => {
                resolution.triggers.extend(state.relocate(player, &path));
                Ok(())
            }
            None => Err("no legal walk"),
        }
    }

    fn steal(
        actor: PlayerId,
        recipient: PlayerId,
        amount: i64,
        state: &mut GameState,
        resolution: &mut Resolution,
    ) -> Result<(), &'static str> {
        if recipient == actor || amount == 0 {
            return Err("nothing to steal");
        }
        let (thief, victim, amount) = if amount > 0 {
            (actor, recipient, amount)
        } else {
            (recipient, actor, amount.saturating_neg())
        };

        let taken = amount.min(state.players[victim].score.max(0));
        if taken == 0 {
            return Err("nothing to steal");
        }
        Self::change_score(victim, -taken, state, resolution);
        Self::change_score(thief, taken, state, resolution);
        Ok(())
    }

    fn change_score(
        player: PlayerId,
        delta: i64,
        state: &mut GameState,
        resolution: &mut Resolution,
    ) {
        let score = {
            let p = &mut state.players[player];
            p.score = p.score.saturating_add(delta);
            p.score
        };
        state.emit(GameEvent::ScoreChanged {
            player,
            delta,
            score,
        });
        resolution.triggers.push(TriggerEvent::new(
            Trigger::ScoreChange { delta: Some(delta) },
            player,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, Permission, PlayerSetup, TileId};
    use crate::effects::{Modifier, ModifierKind, Target};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);
    const P2: PlayerId = PlayerId::new(2);

    fn state() -> GameState {
        GameState::new(
            GameConfig::default(),
            &[
                PlayerSetup::human("A"),
                PlayerSetup::human("B"),
                PlayerSetup::human("C"),
            ],
        )
    }

    fn run(effect: &Effect, actor: PlayerId, state: &mut GameState) -> Resolution {
        EffectResolver::resolve(effect, Some(RuleId::new(1)), actor, state, &mut GameRng::new(3))
    }

    #[test]
    fn test_modify_score_raises_score_change() {
        let mut state = state();
        let resolution = run(&Effect::score(3).on(Target::All), P0, &mut state);

        assert_eq!(resolution.applied.len(), 3);
        assert!(resolution.applied.iter().all(AppliedEffect::was_applied));
        assert!(state.players.values().all(|p| p.score == 3));
        assert_eq!(
            resolution.triggers[0],
            TriggerEvent::new(Trigger::ScoreChange { delta: Some(3) }, P0)
        );
        assert_eq!(state.drain_events().len(), 3);
    }

    #[test]
    fn test_shield_blocks_harmful() {
        let mut state = state();
        state
            .ledger
            .apply(P1, Modifier::Shield, 2, EffectSource::System, 1);

        let resolution = run(&Effect::score(-2).on(Target::Others), P0, &mut state);
        assert_eq!(resolution.applied[0].recipient, P1);
        assert_eq!(resolution.applied[0].outcome, EffectOutcome::Blocked);
        assert_eq!(state.players[P1].score, 0);
        assert_eq!(state.players[P2].score, -2);

        // Beneficial effects pass.
        run(&Effect::score(5).on(Target::Others), P0, &mut state);
        assert_eq!(state.players[P1].score, 5);

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::EffectBlocked {
            rule: Some(RuleId::new(1)),
            player: P1,
            effect: EffectKind::ModifyScore { delta: -2 },
        }));
    }

    #[test]
    fn test_steal_clamps_to_victim_score() {
        let mut state = state();
        state.players[P1].score = 2;

        run(&Effect::steal(5).on(Target::Others), P0, &mut state);
        assert_eq!(state.players[P0].score, 2);
        assert_eq!(state.players[P1].score, 0);
        assert_eq!(state.players[P2].score, 0);

        // Negative amounts flip the direction.
        state.players[P2].score = 3;
        run(&Effect::steal(-1).on(Target::Last), P2, &mut state);
        assert_eq!(state.players[P1].score, 1);
        assert_eq!(state.players[P2].score, 2);
    }

    #[test]
    fn test_move_forward_and_back() {
        let mut state = state();
        let resolution = run(&Effect::move_by(4), P0, &mut state);
        assert_eq!(state.players[P0].position, TileId::new(4));
        assert_eq!(
            resolution.triggers.iter().filter(|t| t.trigger.name() == "pass_over").count(),
            3
        );

        run(&Effect::move_by(-3), P0, &mut state);
        assert_eq!(state.players[P0].position, TileId::new(1));

        // Only one step leads away from the end.
        run(&Effect::move_by(-5), P0, &mut state);
        assert_eq!(state.players[P0].position, TileId::new(0));
    }

    #[test]
    fn test_teleport_and_return() {
        let mut state = state();
        run(&Effect::teleport(TileId::new(7)), P1, &mut state);
        assert_eq!(state.players[P1].position, TileId::new(7));

        let missing = run(&Effect::teleport(TileId::new(70)), P1, &mut state);
        assert!(matches!(missing.applied[0].outcome, EffectOutcome::NoOp(_)));

        run(&Effect::new(EffectKind::ReturnToStart), P1, &mut state);
        assert_eq!(state.players[P1].position, state.board.start());
    }

    #[test]
    fn test_swap_positions() {
        let mut state = state();
        state.players[P1].position = TileId::new(5);
        run(&Effect::new(EffectKind::SwapPositions).on(Target::Leader), P0, &mut state);
        // Leader ties resolve to P0 itself: nothing to swap.
        assert_eq!(state.players[P0].position, TileId::new(0));

        state.players[P1].score = 1;
        run(&Effect::new(EffectKind::SwapPositions).on(Target::Leader), P0, &mut state);
        assert_eq!(state.players[P0].position, TileId::new(5));
        assert_eq!(state.players[P1].position, TileId::new(0));
    }

    #[test]
    fn test_modifier_goes_through_ledger() {
        let mut state = state();
        let resolution = run(&Effect::modifier(Modifier::SpeedBoost, 2), P0, &mut state);

        assert!(state.ledger.has_effect(P0, ModifierKind::SpeedBoost));
        assert_eq!(
            state.ledger.active_effects(P0)[0].source,
            EffectSource::Rule(RuleId::new(1))
        );
        assert_eq!(
            resolution.triggers,
            vec![TriggerEvent::new(
                Trigger::EffectApplied {
                    modifier: Some(ModifierKind::SpeedBoost)
                },
                P0
            )]
        );
    }

    #[test]
    fn test_copy_and_reverse_last_effect() {
        let mut state = state();
        let nothing = run(&Effect::new(EffectKind::CopyLastEffect), P0, &mut state);
        assert!(!nothing.applied[0].was_applied());

        run(&Effect::score(4), P1, &mut state);
        run(&Effect::new(EffectKind::CopyLastEffect), P2, &mut state);
        assert_eq!(state.players[P2].score, 4);

        run(&Effect::new(EffectKind::ReverseLastEffect), P0, &mut state);
        assert_eq!(state.players[P2].score, 0);
        assert_eq!(state.players[P1].score, 4);
    }

    #[test]
    fn test_declare_victory_finishes_game() {
        let mut state = state();
        run(&Effect::victory().on(Target::Others), P0, &mut state);
        assert_eq!(state.winner(), Some(P1));

        let again = run(&Effect::victory(), P0, &mut state);
        assert!(!again.applied[0].was_applied());
        assert_eq!(state.winner(), Some(P1));
    }

    #[test]
    fn test_set_permission() {
        let mut state = state();
        let effect = Effect::new(EffectKind::SetPermission {
            permission: Permission::Tile,
            allowed: false,
        })
        .on(Target::All);

        let resolution = run(&effect, P0, &mut state);
        assert_eq!(resolution.applied.len(), 1);
        assert!(!state.permissions.allows(Permission::Tile));
        assert!(state.permissions.allows(Permission::Rule));
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::PermissionChanged {
                permission: Permission::Tile,
                allowed: false
            }]
        );
    }

    #[test]
    fn test_skip_and_extra_turns() {
        let mut state = state();
        run(&Effect::skip_turn(2).on(Target::Others), P0, &mut state);
        run(&Effect::new(EffectKind::ExtraTurn), P0, &mut state);

        assert_eq!(state.players[P1].skip_turns, 2);
        assert_eq!(state.players[P2].skip_turns, 2);
        assert_eq!(state.players[P0].extra_turns, 1);
    }
}
