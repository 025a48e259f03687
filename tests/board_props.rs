//! Property-based tests for the board graph, walk enumeration and the ledger.

use proptest::prelude::*;

use rulebound::board::{BoardGraph, Direction, PathResolver};
use rulebound::core::{PlayerId, StackingPolicy, TileId};
use rulebound::effects::{EffectLedger, EffectSource, Modifier};

/// Grow a board from a list of `(tile index, direction index)` requests.
/// Requests that hit an occupied square are skipped.
fn grow(ops: &[(usize, usize)]) -> BoardGraph {
    let mut board = BoardGraph::new();
    for &(index, dir) in ops {
        let ids: Vec<TileId> = board.tiles().iter().map(|t| t.id).collect();
        let from = ids[index % ids.len()];
        let _ = board.add_tile(from, Direction::ALL[dir % 4]);
    }
    board
}

fn assert_reciprocal(board: &BoardGraph) -> Result<(), TestCaseError> {
    for tile in board.tiles() {
        for (direction, to) in tile.links() {
            let back = board.tile(to).and_then(|t| t.link(direction.opposite()));
            prop_assert_eq!(back, Some(tile.id), "{:?} from {} is one-way", direction, tile.id);
        }
    }
    Ok(())
}

fn ops() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..64, 0usize..4), 0..40)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every added link has a partner pointing back.
    #[test]
    fn prop_links_are_reciprocal(ops in ops()) {
        let board = grow(&ops);
        assert_reciprocal(&board)?;
    }

    /// Walks have exactly the rolled length, follow links and never revisit.
    #[test]
    fn prop_walks_are_well_formed(ops in ops(), steps in 0u32..7) {
        let board = grow(&ops);
        let start = board.start();

        for path in PathResolver::resolve(&board, start, steps) {
            prop_assert_eq!(path.len(), steps as usize);
            prop_assert_eq!(path.start(), start);

            let tiles = path.tiles();
            for pair in tiles.windows(2) {
                let linked = board
                    .neighbors_of(pair[0])
                    .iter()
                    .any(|&(_, to)| to == pair[1]);
                prop_assert!(linked, "{} does not link to {}", pair[0], pair[1]);
            }
            let mut seen = tiles.to_vec();
            seen.sort();
            seen.dedup();
            prop_assert_eq!(seen.len(), tiles.len());
        }
    }

    /// Destinations are distinct, and each is reachable within the roll.
    #[test]
    fn prop_destinations_are_reachable(ops in ops(), steps in 1u32..7) {
        let board = grow(&ops);
        let start = board.start();

        let destinations: Vec<TileId> = PathResolver::destinations(&board, start, steps)
            .iter()
            .map(|p| p.destination())
            .collect();
        let mut unique = destinations.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), destinations.len());

        let reach = PathResolver::reach(&board, start, steps);
        for tile in destinations {
            let hops = reach.iter().find(|&&(t, _)| t == tile).map(|&(_, h)| h);
            prop_assert!(matches!(hops, Some(h) if h <= steps));
        }
    }

    /// Removing a tile leaves no link to it and keeps the rest reciprocal.
    #[test]
    fn prop_removal_leaves_no_dangling_links(ops in ops(), pick in 0usize..64) {
        let mut board = grow(&ops);
        let candidates: Vec<TileId> = board
            .tiles()
            .iter()
            .map(|t| t.id)
            .filter(|&id| id != board.start())
            .collect();
        prop_assume!(!candidates.is_empty());

        let victim = candidates[pick % candidates.len()];
        let before = board.len();
        board.remove_tile(victim).unwrap();

        prop_assert!(!board.contains(victim));
        prop_assert_eq!(board.len(), before - 1);
        for tile in board.tiles() {
            prop_assert!(!tile.links_to(victim));
        }
        assert_reciprocal(&board)?;
    }

    /// A modifier applied for `d` turns leaves on exactly the `d`th tick.
    #[test]
    fn prop_modifier_expires_after_duration(duration in 1u32..20) {
        let player = PlayerId::new(0);
        let mut ledger = EffectLedger::new(1, StackingPolicy::Refresh);
        ledger.apply(player, Modifier::DoubleDice, duration, EffectSource::System, 1);

        for _ in 1..duration {
            prop_assert!(ledger.tick(player).is_empty());
        }
        prop_assert_eq!(ledger.tick(player).len(), 1);
        prop_assert!(ledger.active_effects(player).is_empty());
    }
}
