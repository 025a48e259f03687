//! The game session: turn state machine over state, rules and RNG.
//!
//! [`Game`] is the single writer of a game. Every inbound action goes
//! through [`Game::apply`], which runs the shared guard, performs the action
//! and returns the events it caused. Rejected actions leave the game
//! untouched.
//!
//! ## Turn flow
//!
//! ```text
//! Roll ──▶ (ChoosePath) ──▶ Modify ──▶ advance ──▶ next player's Roll
//! ```
//!
//! Advancing runs the finishing player's `TurnEnd` rules, ticks their
//! ledger once, settles extra and skipped turns, then starts the next
//! player's turn with `TurnStart`.

use tracing::{debug, info, instrument, warn};

use crate::board::{BoardGraph, Direction, Path, PathResolver, TileKind};
use crate::bot::{BotPlayer, Decision};
use crate::core::{
    Action, ActionError, ConfigError, GameConfig, GameRng, GameRngState, GameState,
    IllegalAction, InvalidTileMutation, MalformedRule, Player, PlayerId, PlayerSetup, RuleId,
    TileId,
};
use crate::effects::ModifierKind;
use crate::rules::{Rule, RuleEngine};
use crate::triggers::{Trigger, TriggerEvent};
use crate::turn::{self, Phase};

use super::events::GameEvent;

/// Builder for a new [`Game`].
///
/// ```
/// use rulebound::core::{GameConfig, PlayerSetup};
/// use rulebound::game::GameBuilder;
///
/// let game = GameBuilder::new()
///     .with_config(GameConfig::default().with_track_length(12))
///     .with_player(PlayerSetup::human("Ada"))
///     .with_player(PlayerSetup::human("Bo"))
///     .with_seed(42)
///     .build()
///     .unwrap();
/// assert_eq!(game.state().player_count(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct GameBuilder {
    config: GameConfig,
    roster: Vec<PlayerSetup>,
    seed: Option<u64>,
    board: Option<BoardGraph>,
    rules: Vec<Rule>,
}

impl GameBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Seat a player. Seats are assigned in call order.
    #[must_use]
    pub fn with_player(mut self, setup: PlayerSetup) -> Self {
        self.roster.push(setup);
        self
    }

    #[must_use]
    pub fn with_players(mut self, setups: impl IntoIterator<Item = PlayerSetup>) -> Self {
        self.roster.extend(setups);
        self
    }

    /// Seed the game RNG. Without a seed, the RNG is seeded from entropy.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start on a prepared board instead of the straight track.
    #[must_use]
    pub fn with_board(mut self, board: BoardGraph) -> Self {
        self.board = Some(board);
        self
    }

    /// Install a rule before the first turn starts.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validate and start the game.
    ///
    /// The first player's `TurnStart` is evaluated here; the events it
    /// produces are returned by the first accepted action.
    pub fn build(self) -> Result<Game, ConfigError> {
        self.config.validate(self.roster.len())?;

        let board = self
            .board
            .unwrap_or_else(|| BoardGraph::track(self.config.track_length));
        let state = GameState::on_board(self.config, board, &self.roster);
        let rng = self.seed.map_or_else(GameRng::from_entropy, GameRng::new);

        let mut game = Game {
            state,
            rules: RuleEngine::new(),
            rng,
        };
        for rule in self.rules {
            game.install_rule(rule)?;
        }

        let first = game.state.current_player();
        info!(players = game.state.player_count(), seed = game.rng.seed(), "game started");
        game.rules.evaluate(
            TriggerEvent::new(Trigger::TurnStart, first),
            &mut game.state,
            &mut game.rng,
        );
        Ok(game)
    }
}

/// A running game.
#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) state: GameState,
    pub(crate) rules: RuleEngine,
    pub(crate) rng: GameRng,
}

/// One step a bot took.
#[derive(Clone, Debug, PartialEq)]
pub struct BotTurn {
    pub player: PlayerId,
    pub decision: Decision,
    pub events: Vec<GameEvent>,
}

impl Game {
    /// Reassemble a game from validated parts.
    pub(crate) fn from_parts(state: GameState, rules: RuleEngine, rng: GameRng) -> Self {
        Self { state, rules, rng }
    }

    // === Read access ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn rules(&self) -> &RuleEngine {
        &self.rules
    }

    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current_player()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.state.player(id)
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.state.cursor.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    /// The walks the current player must choose between, if a choice is
    /// pending.
    #[must_use]
    pub fn pending_choice(&self) -> Option<&[Path]> {
        self.state.cursor.pending_choice()
    }

    /// Whether `actor` may make a modification right now, permissions
    /// included.
    #[must_use]
    pub fn can_modify(&self, actor: PlayerId, permission: crate::core::Permission) -> bool {
        turn::can_modify(&self.state, actor)
            && (actor == self.state.config.host || self.state.permissions.allows(permission))
    }

    // === Host operations ===

    /// Install a rule on behalf of the host application.
    ///
    /// This bypasses the turn guard and does not count as a modification.
    pub fn install_rule(&mut self, rule: Rule) -> Result<RuleId, MalformedRule> {
        self.rules.add(rule, &self.state)
    }

    // === Inbound actions ===

    /// Validate and perform `action` for `actor`.
    ///
    /// Returns every event queued since the previous accepted action.
    #[instrument(skip_all, fields(actor = %actor, action = action.verb()))]
    pub fn apply(
        &mut self,
        actor: PlayerId,
        action: Action,
    ) -> Result<Vec<GameEvent>, ActionError> {
        if let Err(err) = turn::check(&self.state, actor, &action) {
            debug!(%err, "action rejected");
            return Err(err.into());
        }

        let advances = match &action {
            Action::Roll => {
                self.perform_roll(actor);
                false
            }
            Action::ChooseDestination { option } => {
                self.perform_choice(actor, *option)?;
                false
            }
            Action::EndTurn => true,
            modification => {
                if let Err(err) = self.perform_modification(actor, modification) {
                    debug!(%err, "modification rejected");
                    return Err(err);
                }
                self.state.cursor.modifications += 1;
                true
            }
        };

        self.state.record_action(actor, action);
        if advances && !self.state.is_finished() {
            self.advance_turn();
        }
        Ok(self.state.drain_events())
    }

    pub fn roll(&mut self, actor: PlayerId) -> Result<Vec<GameEvent>, ActionError> {
        self.apply(actor, Action::Roll)
    }

    pub fn choose_destination(
        &mut self,
        actor: PlayerId,
        option: usize,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.apply(actor, Action::ChooseDestination { option })
    }

    pub fn end_turn(&mut self, actor: PlayerId) -> Result<Vec<GameEvent>, ActionError> {
        self.apply(actor, Action::EndTurn)
    }

    pub fn create_rule(
        &mut self,
        actor: PlayerId,
        rule: Rule,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.apply(actor, Action::CreateRule { rule })
    }

    pub fn update_rule(
        &mut self,
        actor: PlayerId,
        id: RuleId,
        rule: Rule,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.apply(actor, Action::UpdateRule { id, rule })
    }

    pub fn delete_rule(
        &mut self,
        actor: PlayerId,
        id: RuleId,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.apply(actor, Action::DeleteRule { id })
    }

    pub fn reorder_rule(
        &mut self,
        actor: PlayerId,
        id: RuleId,
        index: usize,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.apply(actor, Action::ReorderRule { id, index })
    }

    pub fn set_rule_active(
        &mut self,
        actor: PlayerId,
        id: RuleId,
        active: bool,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.apply(actor, Action::SetRuleActive { id, active })
    }

    pub fn add_tile(
        &mut self,
        actor: PlayerId,
        from: TileId,
        direction: Direction,
        kind: TileKind,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.apply(
            actor,
            Action::AddTile {
                from,
                direction,
                kind,
            },
        )
    }

    pub fn remove_tile(
        &mut self,
        actor: PlayerId,
        tile: TileId,
    ) -> Result<Vec<GameEvent>, ActionError> {
        self.apply(actor, Action::RemoveTile { tile })
    }

    /// Let the current player's bot take one action through [`Game::apply`].
    ///
    /// Returns `Ok(None)` when the current player is human. A modification
    /// the engine rejects is replaced by ending the turn.
    pub fn play_bot_step(&mut self) -> Result<Option<BotTurn>, ActionError> {
        if self.state.is_finished() {
            return Err(IllegalAction::GameFinished.into());
        }
        let actor = self.state.current_player();
        let Some(difficulty) = self.state.player(actor).and_then(|p| p.bot) else {
            return Ok(None);
        };

        let mut rng = self.rng.fork();
        let can_modify = turn::can_modify(&self.state, actor);
        let decision = BotPlayer::new(difficulty).decide(actor, self, can_modify, &mut rng);

        let events = match self.apply(actor, decision.action.clone()) {
            Ok(events) => events,
            Err(err) if decision.action.is_modification() => {
                warn!(%actor, %err, "bot modification rejected, ending turn");
                self.apply(actor, Action::EndTurn)?
            }
            Err(err) => return Err(err),
        };

        Ok(Some(BotTurn {
            player: actor,
            decision,
            events,
        }))
    }

    // === Internals ===

    /// The final roll value for `player` with every dice modifier applied.
    fn roll_value(&mut self, player: PlayerId) -> u32 {
        let config = &self.state.config;
        let ledger = &self.state.ledger;
        let (lo, hi) = ledger.dice_bounds(player, config.dice_sides);
        let mut value = self.rng.roll(lo, hi);

        if ledger.has_effect(player, ModifierKind::DoubleDice) {
            value = value.saturating_mul(2);
        }
        if ledger.has_effect(player, ModifierKind::SpeedBoost) {
            value = value.saturating_add(config.speed_boost_bonus);
        }
        if ledger.has_effect(player, ModifierKind::Slow) {
            value = (value / 2).max(1);
        }
        value
    }

    fn perform_roll(&mut self, actor: PlayerId) {
        let value = self.roll_value(actor);
        self.state.cursor.last_dice = Some(value);
        self.state.emit(GameEvent::DiceRolled {
            player: actor,
            value,
        });
        self.rules.evaluate(
            TriggerEvent::new(Trigger::dice(value), actor),
            &mut self.state,
            &mut self.rng,
        );
        if self.state.is_finished() {
            return;
        }

        let from = self.state.players[actor].position;
        let mut options = PathResolver::destinations(&self.state.board, from, value);

        if options.is_empty() {
            debug!(%actor, roll = value, "no legal move");
            self.state.emit(GameEvent::NoLegalMove {
                player: actor,
                roll: value,
            });
            self.state.cursor.phase = Phase::Modify;
        } else if options.len() == 1 || self.state.players[actor].is_bot() {
            let pick = self.rng.gen_range_usize(0..options.len());
            let path = options.swap_remove(pick);
            self.state.cursor.phase = Phase::Modify;
            self.move_along(actor, &path);
        } else {
            self.state.emit(GameEvent::PathChoiceRequired {
                player: actor,
                options: options.iter().map(Path::destination).collect(),
            });
            self.state.cursor.phase = Phase::ChoosePath { options };
        }
    }

    fn perform_choice(&mut self, actor: PlayerId, option: usize) -> Result<(), ActionError> {
        let path = self
            .state
            .cursor
            .pending_choice()
            .and_then(|options| options.get(option))
            .cloned()
            .ok_or(IllegalAction::NoPendingChoice)?;
        self.state.cursor.phase = Phase::Modify;
        self.move_along(actor, &path);
        Ok(())
    }

    fn move_along(&mut self, actor: PlayerId, path: &Path) {
        let triggers = self.state.relocate(actor, path);
        self.rules.evaluate_many(triggers, &mut self.state, &mut self.rng);
    }

    fn perform_modification(
        &mut self,
        actor: PlayerId,
        action: &Action,
    ) -> Result<(), ActionError> {
        match action {
            Action::CreateRule { rule } => {
                let rule = rule.clone().with_author(actor);
                let id = self.rules.add(rule, &self.state)?;
                self.state.emit(GameEvent::RuleAdded {
                    rule: id,
                    author: Some(actor),
                });
            }
            Action::UpdateRule { id, rule } => {
                self.rules.update(*id, rule.clone(), &self.state)?;
                self.state.emit(GameEvent::RuleUpdated { rule: *id });
            }
            Action::DeleteRule { id } => {
                self.rules.delete(*id)?;
                self.state.emit(GameEvent::RuleDeleted { rule: *id });
            }
            Action::ReorderRule { id, index } => {
                let index = self.rules.reorder(*id, *index)?;
                self.state.emit(GameEvent::RuleReordered { rule: *id, index });
            }
            Action::SetRuleActive { id, active } => {
                self.rules.set_active(*id, *active)?;
                self.state.emit(GameEvent::RuleToggled {
                    rule: *id,
                    active: *active,
                });
            }
            Action::AddTile {
                from,
                direction,
                kind,
            } => {
                let tile = self.state.board.add_tile_of_kind(*from, *direction, *kind)?;
                let coord = self
                    .state
                    .board
                    .tile(tile)
                    .map(|t| t.coord)
                    .ok_or(InvalidTileMutation::UnknownTile(tile))?;
                self.state.emit(GameEvent::TileAdded {
                    tile,
                    coord,
                    kind: *kind,
                    from: *from,
                });
            }
            Action::RemoveTile { tile } => {
                if let Some(&player) = self.state.players_on(*tile).first() {
                    return Err(InvalidTileMutation::OccupiedByPlayer {
                        tile: *tile,
                        player,
                    }
                    .into());
                }
                self.state.board.remove_tile(*tile)?;
                self.state.emit(GameEvent::TileRemoved { tile: *tile });
            }
            Action::Roll | Action::ChooseDestination { .. } | Action::EndTurn => {
                return Err(IllegalAction::WrongPhase {
                    action: action.verb(),
                    phase: self.state.cursor.phase.name(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Tick `player`'s ledger once and evaluate the expiries.
    fn expire(&mut self, player: PlayerId) {
        let expired = self.state.ledger.tick(player);
        let mut triggers = Vec::with_capacity(expired.len());
        for effect in expired {
            self.state.emit(GameEvent::EffectExpired {
                player,
                modifier: effect.modifier,
            });
            triggers.push(TriggerEvent::new(
                Trigger::EffectExpired {
                    modifier: Some(effect.modifier.kind()),
                },
                player,
            ));
        }
        self.rules.evaluate_many(triggers, &mut self.state, &mut self.rng);
    }

    fn advance_turn(&mut self) {
        let finishing = self.state.current_player();
        let count = self.state.player_count();

        self.rules.evaluate(
            TriggerEvent::new(Trigger::TurnEnd, finishing),
            &mut self.state,
            &mut self.rng,
        );
        if self.state.is_finished() {
            return;
        }
        self.expire(finishing);
        if self.state.is_finished() {
            return;
        }

        let mut next = {
            let player = &mut self.state.players[finishing];
            if player.extra_turns > 0 {
                player.extra_turns -= 1;
                finishing
            } else {
                finishing.next(count)
            }
        };

        // Each pass consumes one owed skip, so this terminates.
        while self.state.players[next].skip_turns > 0 {
            let remaining = {
                let player = &mut self.state.players[next];
                player.skip_turns -= 1;
                player.skip_turns
            };
            debug!(player = %next, remaining, "turn skipped");
            self.state.emit(GameEvent::TurnSkipped {
                player: next,
                remaining,
            });
            self.expire(next);
            if self.state.is_finished() {
                return;
            }
            next = next.next(count);
        }

        self.state.cursor.begin_turn(next);
        let turn = self.state.cursor.turn_number;
        info!(player = %next, turn, "turn advanced");
        self.state.emit(GameEvent::TurnAdvanced { player: next, turn });

        self.rules.evaluate(
            TriggerEvent::new(Trigger::TurnStart, next),
            &mut self.state,
            &mut self.rng,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::Difficulty;
    use crate::core::{Permission, Permissions, StackingPolicy};
    use crate::effects::{Effect, EffectSource, Modifier, Target};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn game() -> Game {
        GameBuilder::new()
            .with_player(PlayerSetup::human("Ada"))
            .with_player(PlayerSetup::human("Bo"))
            .with_seed(7)
            .build()
            .unwrap()
    }

    fn take_turn(game: &mut Game, player: PlayerId) {
        game.roll(player).unwrap();
        if game.pending_choice().is_some() {
            game.choose_destination(player, 0).unwrap();
        }
        game.end_turn(player).unwrap();
    }

    /// A board where tile 1 forks up and down.
    ///
    /// ```text
    ///      3
    ///      |
    /// 0 -- 1
    ///      |
    ///      2
    /// ```
    fn fork() -> BoardGraph {
        let mut board = BoardGraph::new();
        let hub = board.add_tile(board.start(), Direction::Right).unwrap();
        board.add_tile(hub, Direction::Down).unwrap();
        board
            .add_tile_of_kind(hub, Direction::Up, TileKind::End)
            .unwrap();
        board
    }

    #[test]
    fn test_builder_rejects_bad_config() {
        assert_eq!(GameBuilder::new().build().unwrap_err(), ConfigError::NoPlayers);

        let err = GameBuilder::new()
            .with_player(PlayerSetup::human("A"))
            .with_config(GameConfig::default().with_host(PlayerId::new(3)))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::HostNotSeated(PlayerId::new(3)));

        let err = GameBuilder::new()
            .with_player(PlayerSetup::human("A"))
            .with_rule(Rule::new("", Trigger::TurnStart).with_effect(Effect::score(1)))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::Rule(MalformedRule::MissingTitle));
    }

    #[test]
    fn test_roll_moves_and_enters_modify() {
        let mut game = game();
        let events = game.roll(P0).unwrap();

        let value = game.state().cursor.last_dice.unwrap();
        assert!((1..=6).contains(&value));
        assert_eq!(events[0], GameEvent::DiceRolled { player: P0, value });
        assert_eq!(game.state().position(P0), Some(TileId::new(value)));
        assert_eq!(game.phase(), &Phase::Modify);
    }

    #[test]
    fn test_turn_rotation() {
        let mut game = game();
        game.roll(P0).unwrap();
        let events = game.end_turn(P0).unwrap();

        assert_eq!(game.current_player(), P1);
        assert_eq!(game.phase(), &Phase::Roll);
        assert_eq!(game.state().cursor.last_dice, None);
        assert!(events.contains(&GameEvent::TurnAdvanced { player: P1, turn: 2 }));
        assert_eq!(game.state().history.len(), 2);
    }

    #[test]
    fn test_guard_rejections() {
        let mut game = game();
        assert_eq!(
            game.roll(P1),
            Err(ActionError::Illegal(IllegalAction::NotYourTurn {
                actor: P1,
                current: P0
            }))
        );
        assert!(matches!(
            game.end_turn(P0),
            Err(ActionError::Illegal(IllegalAction::WrongPhase { .. }))
        ));
        assert_eq!(
            game.choose_destination(P0, 0),
            Err(ActionError::Illegal(IllegalAction::NoPendingChoice))
        );
    }

    #[test]
    fn test_branch_requires_choice() {
        let mut game = GameBuilder::new()
            .with_board(fork())
            .with_player(PlayerSetup::human("Ada"))
            .with_player(PlayerSetup::human("Bo"))
            .with_config(GameConfig::default().with_dice_sides(1).with_speed_boost_bonus(1))
            .with_seed(1)
            .build()
            .unwrap();

        // Roll 2 from the start: up or down from the hub.
        game.state
            .ledger
            .apply(P0, Modifier::SpeedBoost, 1, EffectSource::System, 1);
        let events = game.roll(P0).unwrap();

        assert!(events.contains(&GameEvent::PathChoiceRequired {
            player: P0,
            options: vec![TileId::new(3), TileId::new(2)],
        }));
        assert_eq!(game.pending_choice().map(<[Path]>::len), Some(2));
        assert!(matches!(
            game.choose_destination(P0, 2),
            Err(ActionError::Illegal(IllegalAction::InvalidChoice {
                option: 2,
                available: 2
            }))
        ));

        game.choose_destination(P0, 1).unwrap();
        assert_eq!(game.state().position(P0), Some(TileId::new(2)));
        assert_eq!(game.phase(), &Phase::Modify);
    }

    #[test]
    fn test_no_legal_move() {
        let mut board = BoardGraph::new();
        board.add_tile(board.start(), Direction::Right).unwrap();
        let mut game = GameBuilder::new()
            .with_board(board)
            .with_player(PlayerSetup::human("Ada"))
            .with_config(GameConfig::default().with_dice_sides(1))
            .with_seed(1)
            .build()
            .unwrap();
        game.state.players[P0].position = TileId::new(1);

        let events = game.roll(P0).unwrap();
        // Tile 1 only links back to the start; a walk of one step exists.
        assert_eq!(game.state().position(P0), Some(TileId::new(0)));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NoLegalMove { .. })));

        game.end_turn(P0).unwrap();
        game.state
            .ledger
            .apply(P0, Modifier::DoubleDice, 1, EffectSource::System, 2);
        let events = game.roll(P0).unwrap();
        assert!(events.contains(&GameEvent::NoLegalMove { player: P0, roll: 2 }));
        assert_eq!(game.phase(), &Phase::Modify);
    }

    #[test]
    fn test_modification_ends_turn() {
        let mut game = game();
        game.roll(P0).unwrap();
        let rule = Rule::new("Bonus", Trigger::TurnStart).with_effect(Effect::score(1));
        let events = game.create_rule(P0, rule).unwrap();

        assert!(events.contains(&GameEvent::RuleAdded {
            rule: RuleId::new(1),
            author: Some(P0),
        }));
        assert_eq!(game.current_player(), P1);
        // The new rule fires on P1's turn start.
        assert_eq!(game.state().score(P1), Some(1));
    }

    #[test]
    fn test_rejected_modification_keeps_turn() {
        let mut game = game();
        game.roll(P0).unwrap();
        let before = game.state().history.len();

        let err = game
            .add_tile(P0, TileId::new(0), Direction::Right, TileKind::Normal)
            .unwrap_err();
        assert!(matches!(
            err,
            ActionError::Tile(InvalidTileMutation::PositionOccupied(_))
        ));
        assert_eq!(game.current_player(), P0);
        assert_eq!(game.phase(), &Phase::Modify);
        assert_eq!(game.state().history.len(), before);
    }

    #[test]
    fn test_remove_occupied_tile() {
        let mut game = game();
        game.roll(P0).unwrap();
        let err = game.remove_tile(P0, TileId::new(0));
        assert_eq!(
            err,
            Err(ActionError::Tile(InvalidTileMutation::OccupiedByPlayer {
                tile: TileId::new(0),
                player: P1
            }))
        );
    }

    #[test]
    fn test_permissions_and_host() {
        let mut game = GameBuilder::new()
            .with_player(PlayerSetup::human("Host"))
            .with_player(PlayerSetup::human("Guest"))
            .with_config(GameConfig::default().with_permissions(Permissions {
                allow_rule_creation: true,
                allow_tile_creation: false,
            }))
            .with_seed(3)
            .build()
            .unwrap();

        // The host ignores the switch.
        game.roll(P0).unwrap();
        game.add_tile(P0, TileId::new(4), Direction::Down, TileKind::Special)
            .unwrap();

        game.roll(P1).unwrap();
        assert!(!game.can_modify(P1, Permission::Tile));
        assert!(game.can_modify(P1, Permission::Rule));
        assert_eq!(
            game.add_tile(P1, TileId::new(4), Direction::Up, TileKind::Normal),
            Err(ActionError::Illegal(IllegalAction::PermissionDisabled(
                Permission::Tile
            )))
        );
    }

    #[test]
    fn test_skip_and_extra_turns() {
        let mut game = game();
        game.state.players[P1].skip_turns = 1;

        game.roll(P0).unwrap();
        let events = game.end_turn(P0).unwrap();
        assert!(events.contains(&GameEvent::TurnSkipped {
            player: P1,
            remaining: 0
        }));
        assert_eq!(game.current_player(), P0);

        game.state.players[P0].extra_turns = 1;
        take_turn(&mut game, P0);
        assert_eq!(game.current_player(), P0);
        take_turn(&mut game, P0);
        assert_eq!(game.current_player(), P1);
    }

    #[test]
    fn test_skipped_turn_ticks_ledger() {
        let mut game = game();
        game.state
            .ledger
            .apply(P1, Modifier::Shield, 1, EffectSource::System, 1);
        game.state.players[P1].skip_turns = 1;

        game.roll(P0).unwrap();
        let events = game.end_turn(P0).unwrap();
        assert!(events.contains(&GameEvent::EffectExpired {
            player: P1,
            modifier: Modifier::Shield
        }));
    }

    #[test]
    fn test_dice_modifiers() {
        let mut game = GameBuilder::new()
            .with_player(PlayerSetup::human("A"))
            .with_config(
                GameConfig::default()
                    .with_stacking(StackingPolicy::Refresh)
                    .with_track_length(40),
            )
            .with_seed(11)
            .build()
            .unwrap();
        let ledger = &mut game.state.ledger;
        ledger.apply(P0, Modifier::DiceMin { value: 4 }, 5, EffectSource::System, 1);
        ledger.apply(P0, Modifier::DiceMax { value: 4 }, 5, EffectSource::System, 1);
        ledger.apply(P0, Modifier::DoubleDice, 5, EffectSource::System, 1);
        ledger.apply(P0, Modifier::SpeedBoost, 5, EffectSource::System, 1);

        // 4 doubled plus the bonus of 2.
        assert_eq!(game.roll_value(P0), 10);

        game.state
            .ledger
            .apply(P0, Modifier::Slow, 5, EffectSource::System, 1);
        assert_eq!(game.roll_value(P0), 5);
    }

    #[test]
    fn test_victory_blocks_further_actions() {
        let mut game = GameBuilder::new()
            .with_player(PlayerSetup::human("A"))
            .with_player(PlayerSetup::human("B"))
            .with_rule(
                Rule::new("Crown", Trigger::TurnEnd)
                    .with_effect(Effect::victory().on(Target::Self_)),
            )
            .with_seed(5)
            .build()
            .unwrap();

        game.roll(P0).unwrap();
        let events = game.end_turn(P0).unwrap();
        assert!(events.contains(&GameEvent::GameOver { winner: P0 }));
        assert!(game.is_finished());
        assert_eq!(game.current_player(), P0);
        assert_eq!(
            game.roll(P0),
            Err(ActionError::Illegal(IllegalAction::GameFinished))
        );
    }

    #[test]
    fn test_bot_step() {
        let mut game = GameBuilder::new()
            .with_player(PlayerSetup::bot("Robo", Difficulty::Hard))
            .with_player(PlayerSetup::human("Ada"))
            .with_seed(9)
            .build()
            .unwrap();

        let step = game.play_bot_step().unwrap().unwrap();
        assert_eq!(step.player, P0);
        assert_eq!(step.decision.action, Action::Roll);
        assert_eq!(game.phase(), &Phase::Modify);

        game.play_bot_step().unwrap().unwrap();
        assert_eq!(game.current_player(), P1);
        assert!(game.play_bot_step().unwrap().is_none());
    }
}
