//! Property-based invariant tests for the move engine and spawner.
//!
//! 1. `merge_row` conserves the sum of a row and never merges a tile twice
//! 2. A slide conserves the board sum and reports merges consistently
//! 3. A second slide in the same direction can only merge, never slide
//! 4. Orientation transforms are inverses
//! 5. `can_move` agrees with an adjacency oracle
//! 6. Spawns land on a previously empty cell with value 2 or 4
//! 7. Game score grows by exactly the merged value

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use twenty48_core::{
    Board, Direction, Game, GameConfig, Pos, SpawnOutcome, can_move, merge_row, slide, spawn_tile,
};

// ── Strategies ──────────────────────────────────────────────────────────

fn tile() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => Just(0u32),
        2 => (1u32..=4).prop_map(|e| 1 << e),
        1 => (1u32..=12).prop_map(|e| 1 << e),
    ]
}

fn row() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(tile(), 1..8)
}

fn board() -> impl Strategy<Value = Board> {
    (1usize..=6).prop_flat_map(|n| {
        prop::collection::vec(tile(), n * n).prop_map(move |cells| {
            let rows: Vec<Vec<u32>> = cells.chunks(n).map(<[u32]>::to_vec).collect();
            Board::from_rows(&rows).expect("strategy yields valid tiles")
        })
    })
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

/// Independent check: an empty cell or an equal orthogonal pair exists.
fn has_move_oracle(b: &Board) -> bool {
    let n = b.size();
    let at = |r, c| b.get(Pos::new(r, c)).unwrap_or(0);
    (0..n).any(|r| {
        (0..n).any(|c| {
            at(r, c) == 0
                || (c + 1 < n && at(r, c) == at(r, c + 1))
                || (r + 1 < n && at(r, c) == at(r + 1, c))
        })
    })
}

// ── merge_row ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn merge_row_conserves_sum(input in row()) {
        let out = merge_row(&input);
        let before: u64 = input.iter().map(|&v| u64::from(v)).sum();
        let after: u64 = out.cells.iter().map(|&v| u64::from(v)).sum();
        prop_assert_eq!(before, after);
        prop_assert_eq!(out.cells.len(), input.len());
    }

    #[test]
    fn merge_row_is_packed_and_merges_pairs_once(input in row()) {
        let out = merge_row(&input);
        let tiles_in = input.iter().filter(|&&v| v != 0).count();
        let tiles_out = out.cells.iter().filter(|&&v| v != 0).count();

        // Zeros only at the tail.
        prop_assert!(out.cells[..tiles_out].iter().all(|&v| v != 0));
        prop_assert!(out.cells[tiles_out..].iter().all(|&v| v == 0));

        // Each merge consumes exactly two input tiles.
        prop_assert_eq!(tiles_in, tiles_out + out.merged.len());
        prop_assert!(tiles_out >= tiles_in.div_ceil(2));

        let merged_sum: u64 = out.merged.iter().map(|&i| u64::from(out.cells[i])).sum();
        prop_assert_eq!(merged_sum, out.gained);
    }

    #[test]
    fn merge_row_of_equal_tiles_halves(k in 1usize..8, e in 1u32..10) {
        let v = 1u32 << e;
        let out = merge_row(&vec![v; k]);
        let mut expected = vec![v * 2; k / 2];
        if k % 2 == 1 {
            expected.push(v);
        }
        expected.resize(k, 0);
        prop_assert_eq!(out.cells, expected);
    }
}

// ── slide ───────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn slide_conserves_sum(b in board(), dir in direction()) {
        let s = slide(&b, dir);
        prop_assert_eq!(s.board.sum(), b.sum());
        prop_assert_eq!(s.board.size(), b.size());
        prop_assert_eq!(s.changed, s.board != b);
    }

    #[test]
    fn slide_reports_merged_cells(b in board(), dir in direction()) {
        let s = slide(&b, dir);
        let merged_sum: u64 = s
            .merged
            .iter()
            .map(|&p| u64::from(s.board.get(p).unwrap()))
            .sum();
        prop_assert_eq!(merged_sum, s.gained);
        if !s.changed {
            prop_assert!(s.merged.is_empty());
        }
    }

    #[test]
    fn second_slide_only_merges(b in board(), dir in direction()) {
        let first = slide(&b, dir);
        let second = slide(&first.board, dir);
        prop_assert_eq!(second.changed, !second.merged.is_empty());
        if first.merged.is_empty() {
            // Nothing merged the first time, so nothing can merge now.
            prop_assert!(!second.changed);
        }
    }

    #[test]
    fn orient_restore_round_trip(b in board(), dir in direction()) {
        let n = b.size();
        let oriented = dir.orient(b.cells(), n);
        prop_assert_eq!(dir.restore(&oriented, n), b.cells().to_vec());
    }

    #[test]
    fn can_move_matches_oracle(b in board()) {
        prop_assert_eq!(can_move(&b), has_move_oracle(&b));
    }
}

// ── spawn / game ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn spawn_targets_an_empty_cell(b in board(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        match spawn_tile(&b, &mut rng, 0.1) {
            SpawnOutcome::Placed { board, spawn } => {
                prop_assert_eq!(b.get(spawn.pos), Some(0));
                prop_assert!(spawn.value == 2 || spawn.value == 4);
                for (pos, value) in b.iter() {
                    let expected = if pos == spawn.pos { spawn.value } else { value };
                    prop_assert_eq!(board.get(pos), Some(expected));
                }
            }
            SpawnOutcome::BoardFull => prop_assert!(b.empty_cells().is_empty()),
        }
    }

    #[test]
    fn game_score_tracks_merges(
        seed in any::<u64>(),
        dirs in prop::collection::vec(direction(), 1..40),
    ) {
        let mut game = Game::new(GameConfig::default(), SmallRng::seed_from_u64(seed)).unwrap();
        game.start();
        for dir in dirs {
            let score = game.score();
            let tiles = 16 - game.board().empty_cells().len();
            let before = game.board().clone();
            let turn = game.play(dir);
            prop_assert_eq!(game.score(), score + turn.gained);
            if turn.changed {
                let after = 16 - game.board().empty_cells().len();
                prop_assert_eq!(after, tiles - turn.merged.len() + 1);
                prop_assert!(turn.spawn.is_some());
            } else {
                prop_assert_eq!(game.board(), &before);
                prop_assert!(turn.spawn.is_none());
            }
        }
    }
}
