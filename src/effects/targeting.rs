//! Target selection.
//!
//! Turns a [`Target`] selector into concrete players, relative to the
//! triggering player (the *actor*). Invisible players can only be reached
//! through `Self_`. `Leader` and `Last` break score ties toward the lowest
//! seat, and `Random` draws from the injected RNG.

use crate::core::{GameRng, GameState, PlayerId, PlayerSet};

use super::effect::Target;

/// Resolve `target` for `actor`, in seat order.
pub fn resolve(target: Target, actor: PlayerId, state: &GameState, rng: &mut GameRng) -> PlayerSet {
    let mut selected = PlayerSet::new();

    match target {
        Target::Self_ => {
            if state.players.contains(actor) {
                selected.push(actor);
            }
        }
        Target::All => selected = state.visible_players(),
        Target::Others => {
            selected = state
                .visible_players()
                .into_iter()
                .filter(|&p| p != actor)
                .collect();
        }
        Target::Random => {
            let visible = state.visible_players();
            if let Some(&pick) = rng.choose(&visible) {
                selected.push(pick);
            }
        }
        Target::Leader => {
            let leader = state
                .visible_players()
                .into_iter()
                .min_by_key(|&p| (std::cmp::Reverse(state.players[p].score), p));
            selected.extend(leader);
        }
        Target::Last => {
            let last = state
                .visible_players()
                .into_iter()
                .min_by_key(|&p| (state.players[p].score, p));
            selected.extend(last);
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, PlayerSetup};
    use crate::effects::{EffectSource, Modifier};

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

    fn hide(state: &mut GameState, player: PlayerId) {
        state
            .ledger
            .apply(player, Modifier::Invisibility, 2, EffectSource::System, 1);
    }

    #[test]
    fn test_self_all_others() {
        let state = state();
        let mut rng = GameRng::new(1);

        assert_eq!(resolve(Target::Self_, P1, &state, &mut rng).as_slice(), &[P1]);
        assert_eq!(
            resolve(Target::All, P1, &state, &mut rng).as_slice(),
            &[P0, P1, P2]
        );
        assert_eq!(
            resolve(Target::Others, P1, &state, &mut rng).as_slice(),
            &[P0, P2]
        );
    }

    #[test]
    fn test_leader_and_last_ties_to_lowest_seat() {
        let mut state = state();
        let mut rng = GameRng::new(1);

        // All tied at zero.
        assert_eq!(resolve(Target::Leader, P2, &state, &mut rng).as_slice(), &[P0]);
        assert_eq!(resolve(Target::Last, P2, &state, &mut rng).as_slice(), &[P0]);

        state.players[P1].score = 5;
        state.players[P2].score = 5;
        state.players[P0].score = -1;
        assert_eq!(resolve(Target::Leader, P0, &state, &mut rng).as_slice(), &[P1]);
        assert_eq!(resolve(Target::Last, P1, &state, &mut rng).as_slice(), &[P0]);
    }

    #[test]
    fn test_invisible_only_self_targetable() {
        let mut state = state();
        let mut rng = GameRng::new(1);
        state.players[P1].score = 10;
        hide(&mut state, P1);

        assert_eq!(resolve(Target::Self_, P1, &state, &mut rng).as_slice(), &[P1]);
        assert_eq!(
            resolve(Target::All, P0, &state, &mut rng).as_slice(),
            &[P0, P2]
        );
        assert_eq!(resolve(Target::Leader, P0, &state, &mut rng).as_slice(), &[P0]);
        for _ in 0..20 {
            assert_ne!(resolve(Target::Random, P0, &state, &mut rng).as_slice(), &[P1]);
        }
    }

    #[test]
    fn test_random_is_deterministic() {
        let state = state();
        let picks = |seed| {
            let mut rng = GameRng::new(seed);
            (0..10)
                .map(|_| resolve(Target::Random, P0, &state, &mut rng)[0])
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(9), picks(9));
    }

    #[test]
    fn test_everyone_invisible() {
        let mut state = state();
        let mut rng = GameRng::new(1);
        for p in [P0, P1, P2] {
            hide(&mut state, p);
        }
        assert!(resolve(Target::Random, P0, &state, &mut rng).is_empty());
        assert!(resolve(Target::Leader, P0, &state, &mut rng).is_empty());
        assert_eq!(resolve(Target::Self_, P0, &state, &mut rng).as_slice(), &[P0]);
    }
}
