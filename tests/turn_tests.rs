//! Turn flow through the public session API.
//!
//! These tests drive games only through `Game::apply` and its wrappers, the
//! way a front-end would.

use rulebound::board::{BoardGraph, Direction, Path, TileKind};
use rulebound::core::{
    Action, ActionError, GameConfig, IllegalAction, MalformedRule, PlayerId, PlayerSetup, RuleId,
    TileId,
};
use rulebound::effects::{Effect, Modifier, Target};
use rulebound::game::{Game, GameBuilder, GameEvent};
use rulebound::rules::Rule;
use rulebound::triggers::Trigger;
use rulebound::turn::Phase;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const P2: PlayerId = PlayerId::new(2);

fn two_player(seed: u64) -> Game {
    GameBuilder::new()
        .with_player(PlayerSetup::human("Ada"))
        .with_player(PlayerSetup::human("Bo"))
        .with_seed(seed)
        .build()
        .unwrap()
}

fn snapshot_bytes(game: &Game) -> Vec<u8> {
    game.snapshot().to_bytes().unwrap()
}

#[test]
fn test_straight_track_has_one_destination() {
    for seed in 0..20 {
        let mut game = two_player(seed);
        let events = game.roll(P0).unwrap();

        let value = game.state().cursor.last_dice.unwrap();
        assert!(!events
            .iter()
            .any(|e| matches!(e, GameEvent::PathChoiceRequired { .. })));
        assert_eq!(game.state().position(P0), Some(TileId::new(value)));
        assert!(events.contains(&GameEvent::PlayerMoved {
            player: P0,
            from: TileId::new(0),
            to: TileId::new(value),
            path: (0..=value).map(TileId::new).collect(),
        }));
    }
}

#[test]
fn test_branch_offers_two_destinations() {
    // 0 -- 1, with 1 forking up to an end tile and down to a normal one.
    let mut board = BoardGraph::new();
    let hub = board.add_tile(board.start(), Direction::Right).unwrap();
    board.add_tile(hub, Direction::Down).unwrap();
    board
        .add_tile_of_kind(hub, Direction::Up, TileKind::End)
        .unwrap();

    let mut game = GameBuilder::new()
        .with_board(board)
        .with_player(PlayerSetup::human("Ada"))
        .with_config(
            GameConfig::default()
                .with_dice_sides(1)
                .with_speed_boost_bonus(1),
        )
        .with_rule(
            Rule::new("Head start", Trigger::TurnStart)
                .with_effect(Effect::modifier(Modifier::SpeedBoost, 1)),
        )
        .with_seed(3)
        .build()
        .unwrap();

    let events = game.roll(P0).unwrap();
    assert!(events.contains(&GameEvent::DiceRolled {
        player: P0,
        value: 2
    }));
    assert!(events.contains(&GameEvent::PathChoiceRequired {
        player: P0,
        options: vec![TileId::new(3), TileId::new(2)],
    }));

    let options = game.pending_choice().unwrap();
    assert_eq!(options.len(), 2);
    assert!(options.iter().all(|p| p.len() == 2));
    assert_eq!(options.iter().map(Path::destination).collect::<Vec<_>>(), vec![
        TileId::new(3),
        TileId::new(2)
    ]);

    // Ending the turn is not allowed until a destination is picked.
    assert!(matches!(
        game.end_turn(P0),
        Err(ActionError::Illegal(IllegalAction::WrongPhase { .. }))
    ));

    let events = game.choose_destination(P0, 0).unwrap();
    assert!(events.contains(&GameEvent::PlayerMoved {
        player: P0,
        from: TileId::new(0),
        to: TileId::new(3),
        path: vec![TileId::new(0), TileId::new(1), TileId::new(3)],
    }));
    assert_eq!(game.phase(), &Phase::Modify);
}

#[test]
fn test_single_modification_per_turn() {
    let mut game = two_player(8);
    game.roll(P0).unwrap();
    game.create_rule(
        P0,
        Rule::new("Stipend", Trigger::TurnEnd).with_effect(Effect::score(1)),
    )
    .unwrap();

    // The modification handed the turn over.
    assert_eq!(game.current_player(), P1);
    assert_eq!(
        game.delete_rule(P0, RuleId::new(1)),
        Err(ActionError::Illegal(IllegalAction::NotYourTurn {
            actor: P0,
            current: P1
        }))
    );

    // At most one modification is recorded per turn.
    let modifications: Vec<u32> = game
        .state()
        .history
        .iter()
        .filter(|r| r.action.is_modification())
        .map(|r| r.turn)
        .collect();
    assert_eq!(modifications, vec![1]);
}

#[test]
fn test_modification_needs_a_roll_first() {
    let mut game = two_player(8);
    assert_eq!(
        game.add_tile(P0, TileId::new(3), Direction::Up, TileKind::Normal),
        Err(ActionError::Illegal(IllegalAction::WrongPhase {
            action: "add a tile",
            phase: "roll",
        }))
    );
}

#[test]
fn test_rejected_actions_change_nothing() {
    let mut game = two_player(12);
    game.roll(P0).unwrap();
    let before = snapshot_bytes(&game);

    let rejected: Vec<(PlayerId, Action)> = vec![
        (P1, Action::Roll),
        (P0, Action::Roll),
        (P0, Action::ChooseDestination { option: 0 }),
        (P0, Action::add_tile(TileId::new(0), Direction::Right)),
        (P0, Action::RemoveTile { tile: TileId::new(0) }),
        (P0, Action::RemoveTile { tile: TileId::new(42) }),
        (P0, Action::DeleteRule { id: RuleId::new(9) }),
        (
            P0,
            Action::CreateRule {
                rule: Rule::new("Nothing", Trigger::TurnStart),
            },
        ),
        (
            P0,
            Action::CreateRule {
                rule: Rule::new("Far away", Trigger::land(TileId::new(77)))
                    .with_effect(Effect::score(1)),
            },
        ),
        (PlayerId::new(5), Action::EndTurn),
    ];

    for (actor, action) in rejected {
        assert!(game.apply(actor, action.clone()).is_err(), "{action:?} was accepted");
        assert_eq!(snapshot_bytes(&game), before, "{action:?} changed the game");
    }
}

#[test]
fn test_malformed_rule_errors() {
    let mut game = two_player(2);
    game.roll(P0).unwrap();

    assert_eq!(
        game.create_rule(P0, Rule::new("Empty", Trigger::TurnStart)),
        Err(ActionError::Rule(MalformedRule::EmptyEffects))
    );
    assert_eq!(
        game.create_rule(
            P0,
            Rule::new("Big roll", Trigger::dice(99)).with_effect(Effect::score(1))
        ),
        Err(ActionError::Rule(MalformedRule::DiceValueOutOfRange {
            value: 99,
            max: 14
        }))
    );
    assert_eq!(
        game.create_rule(
            P0,
            Rule::new("Warp", Trigger::TurnEnd).with_effect(Effect::teleport(TileId::new(40)))
        ),
        Err(ActionError::Rule(MalformedRule::UnknownTile(TileId::new(40))))
    );
    assert_eq!(game.current_player(), P0);
}

#[test]
fn test_skip_turn_rule() {
    let mut game = GameBuilder::new()
        .with_player(PlayerSetup::human("Ada"))
        .with_player(PlayerSetup::human("Bo"))
        .with_player(PlayerSetup::human("Cy"))
        .with_seed(4)
        .build()
        .unwrap();

    // Whoever ends a turn makes everyone else sit out once.
    game.roll(P0).unwrap();
    let events = game
        .create_rule(
            P0,
            Rule::new("Nap", Trigger::TurnEnd).with_effect(Effect::skip_turn(1).on(Target::Others)),
        )
        .unwrap();

    // The rule is live by the time P0's turn ends.
    for skipped in [P1, P2] {
        assert!(events.contains(&GameEvent::TurnSkipped {
            player: skipped,
            remaining: 0
        }));
    }
    assert_eq!(game.current_player(), P0);
    assert_eq!(game.state().cursor.turn_number, 2);

    game.roll(P0).unwrap();
    if game.pending_choice().is_some() {
        game.choose_destination(P0, 0).unwrap();
    }
    game.end_turn(P0).unwrap();
    assert_eq!(game.current_player(), P0);
    assert_eq!(game.state().cursor.turn_number, 3);
}

#[test]
fn test_history_records_accepted_actions() {
    let mut game = two_player(5);
    game.roll(P0).unwrap();
    game.end_turn(P0).unwrap();
    game.roll(P1).unwrap();

    let history: Vec<(PlayerId, u32, u32)> = game
        .state()
        .history
        .iter()
        .map(|r| (r.player, r.turn, r.sequence))
        .collect();
    assert_eq!(history, vec![(P0, 1, 0), (P0, 1, 1), (P1, 2, 0)]);
}
