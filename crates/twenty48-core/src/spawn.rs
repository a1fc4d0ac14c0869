//! Random tile placement.

use rand::Rng;

use crate::board::{Board, Pos};

/// A tile placed by [`spawn_tile`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spawn {
    pub pos: Pos,
    pub value: u32,
}

/// Outcome of a spawn attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpawnOutcome {
    /// A tile was placed; `board` is the new board.
    Placed { board: Board, spawn: Spawn },
    /// The board had no empty cell. Nothing was placed.
    BoardFull,
}

impl SpawnOutcome {
    /// The placed tile, if any.
    pub fn spawn(&self) -> Option<Spawn> {
        match self {
            Self::Placed { spawn, .. } => Some(*spawn),
            Self::BoardFull => None,
        }
    }
}

/// Pick the value of a new tile: 4 with probability `four_chance`, else 2.
pub fn random_tile_value(rng: &mut impl Rng, four_chance: f64) -> u32 {
    if rng.random_bool(four_chance.clamp(0.0, 1.0)) {
        4
    } else {
        2
    }
}

/// Place one tile in an empty cell chosen uniformly at random.
pub fn spawn_tile(board: &Board, rng: &mut impl Rng, four_chance: f64) -> SpawnOutcome {
    let empty = board.empty_cells();
    if empty.is_empty() {
        log::warn!("spawn skipped: board is full");
        return SpawnOutcome::BoardFull;
    }

    let pos = empty[rng.random_range(0..empty.len())];
    let value = random_tile_value(rng, four_chance);
    let mut cells = board.cells().to_vec();
    cells[pos.row * board.size() + pos.col] = value;
    log::debug!("spawned {value} at {pos}");
    SpawnOutcome::Placed {
        board: Board::from_cells(cells, board.size()),
        spawn: Spawn { pos, value },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn spawn_fills_an_empty_cell() {
        let mut rng = SmallRng::seed_from_u64(7);
        let before = Board::from_rows(&[[2u32, 0], [4, 0]]).unwrap();
        for _ in 0..50 {
            let SpawnOutcome::Placed { board, spawn } = spawn_tile(&before, &mut rng, 0.1) else {
                panic!("board has room");
            };
            assert!(spawn.pos == Pos::new(0, 1) || spawn.pos == Pos::new(1, 1));
            assert!(spawn.value == 2 || spawn.value == 4);
            assert_eq!(board.get(spawn.pos), Some(spawn.value));
            assert_eq!(board.empty_cells().len(), 1);
        }
    }

    #[test]
    fn spawn_on_full_board_is_reported() {
        let mut rng = SmallRng::seed_from_u64(1);
        let full = Board::from_rows(&[[2u32, 4], [8, 16]]).unwrap();
        let out = spawn_tile(&full, &mut rng, 0.1);
        assert_eq!(out, SpawnOutcome::BoardFull);
        assert_eq!(out.spawn(), None);
    }

    #[test]
    fn four_chance_extremes() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(random_tile_value(&mut rng, 0.0), 2);
            assert_eq!(random_tile_value(&mut rng, 1.0), 4);
        }
    }

    #[test]
    fn value_distribution_is_mostly_twos() {
        let mut rng = SmallRng::seed_from_u64(42);
        let fours = (0..10_000)
            .filter(|_| random_tile_value(&mut rng, 0.1) == 4)
            .count();
        assert!((700..1300).contains(&fours), "fours = {fours}");
    }

    #[test]
    fn positions_are_roughly_uniform() {
        let mut rng = SmallRng::seed_from_u64(9);
        let board = Board::new(2);
        let mut hits = [0usize; 4];
        for _ in 0..4_000 {
            let spawn = spawn_tile(&board, &mut rng, 0.1).spawn().unwrap();
            hits[spawn.pos.row * 2 + spawn.pos.col] += 1;
        }
        assert!(hits.iter().all(|&h| (800..1200).contains(&h)), "{hits:?}");
    }
}
